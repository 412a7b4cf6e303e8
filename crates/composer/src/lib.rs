//! Template documents for page overlays.
//!
//! This crate provides low-level PDF manipulation using lopdf:
//! - Loading a template document and counting its pages
//! - Deep object copying between documents with cycle detection
//! - Importing template pages into another document as Form XObjects, sharing
//!   the objects they have in common

mod error;

pub use error::ComposerError;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::HashMap;
use std::path::Path;

/// US Letter in points, used when a template page declares no MediaBox.
const FALLBACK_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Bound on Parent-chain walks, so a malformed page tree cannot loop forever.
const MAX_TREE_DEPTH: usize = 64;

/// Copies objects from one document into another, renumbering them.
///
/// `id_map` maps source ids to target ids and may outlive the copier, so
/// later copies into the same target reuse what is already there.
struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: &'a mut HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(
        source_doc: &'a Document,
        target_doc: &'a mut Document,
        id_map: &'a mut HashMap<ObjectId, ObjectId>,
    ) -> Self {
        Self { source_doc, target_doc, id_map }
    }

    /// Copies `source_id` and everything it references, each object at most once.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the target id before recursing so reference cycles terminate.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;
        self.target_doc.objects.insert(new_id, new_obj);

        Ok(new_id)
    }

    /// Rewrites every reference inside `obj` to point at a copied object.
    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(arr) => arr
                .into_iter()
                .map(|o| self.remap_references(o))
                .collect::<Result<Vec<_>, _>>()
                .map(Object::Array),
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.remap_dictionary(dict)?)),
            Object::Stream(mut stream) => {
                stream.dict = self.remap_dictionary(stream.dict)?;
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }

    fn remap_dictionary(&mut self, mut dict: Dictionary) -> Result<Dictionary, lopdf::Error> {
        for (_, value) in dict.iter_mut() {
            *value = self.remap_references(value.clone())?;
        }
        Ok(dict)
    }
}

/// A pre-existing multi-page PDF whose pages are stamped behind generated pages.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl TemplateDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ComposerError> {
        let path = path.as_ref();
        log::debug!("Loading template document {}", path.display());
        Ok(Self::from_document(Document::load(path)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ComposerError> {
        Ok(Self::from_document(Document::load_mem(bytes)?))
    }

    pub fn from_document(doc: Document) -> Self {
        // get_pages is keyed by 1-based page number, so values come out in page order.
        let page_ids = doc.get_pages().into_values().collect();
        Self { doc, page_ids }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Starts importing pages of this template into one target document.
    pub fn importer(&self) -> PageImporter<'_> {
        PageImporter { template: self, id_map: HashMap::new() }
    }

    /// Looks up `key` on the page, then on its ancestors in the page tree.
    fn inherited_attribute(&self, page_id: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut node = self.doc.get_object(page_id).and_then(Object::as_dict).ok()?;
        for _ in 0..MAX_TREE_DEPTH {
            if let Ok(value) = node.get(key) {
                return Some(value);
            }
            let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = self.doc.get_object(parent_id).and_then(Object::as_dict).ok()?;
        }
        None
    }

    fn rectangle(&self, obj: &Object) -> Option<[f32; 4]> {
        let obj = match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            other => other,
        };
        let values = obj.as_array().ok()?;
        if values.len() != 4 {
            return None;
        }
        let mut rect = [0.0; 4];
        for (slot, value) in rect.iter_mut().zip(values) {
            *slot = match value {
                Object::Integer(i) => *i as f32,
                Object::Real(r) => *r as f32,
                _ => return None,
            };
        }
        Some(rect)
    }
}

/// Imports pages of one template into one target document.
///
/// Objects shared by several template pages, such as fonts, are copied into
/// the target only once. Use a fresh importer for every target document.
#[derive(Debug)]
pub struct PageImporter<'t> {
    template: &'t TemplateDocument,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl PageImporter<'_> {
    /// Imports 1-based template page `page` into `target` as a Form XObject.
    ///
    /// The page's content streams are concatenated into the form, and its
    /// resources (inherited from the page tree if needed) are deep-copied.
    pub fn import_page(
        &mut self,
        target: &mut Document,
        page: u32,
    ) -> Result<ObjectId, ComposerError> {
        let template = self.template;
        let page_id = page
            .checked_sub(1)
            .and_then(|index| template.page_ids.get(index as usize))
            .copied()
            .ok_or(ComposerError::PageOutOfRange { page, count: template.page_count() })?;

        let content = template.doc.get_page_content(page_id)?;
        let bbox = template
            .inherited_attribute(page_id, b"MediaBox")
            .and_then(|media_box| template.rectangle(media_box))
            .unwrap_or(FALLBACK_MEDIA_BOX);

        let resources = match template.inherited_attribute(page_id, b"Resources") {
            Some(resources) => {
                let mut copier = ObjectCopier::new(&template.doc, target, &mut self.id_map);
                copier.remap_references(resources.clone())?
            }
            None => Object::Dictionary(Dictionary::new()),
        };

        let form = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "FormType" => 1,
                "BBox" => bbox.iter().map(|v| Object::Real(*v)).collect::<Vec<Object>>(),
                "Resources" => resources,
            },
            content,
        );
        let xobject_id = target.add_object(Object::Stream(form));
        log::debug!("Imported template page {} as form object {:?}", page, xobject_id);

        Ok(xobject_id)
    }
}
