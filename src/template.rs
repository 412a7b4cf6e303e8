/// What the renderer knows about the template document: how many pages it has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateDescriptor {
    source_page_count: usize,
}

impl TemplateDescriptor {
    pub fn new(source_page_count: usize) -> Self {
        Self { source_page_count }
    }

    /// A descriptor for documents rendered without a template.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.source_page_count
    }

    /// Template page to draw behind generated page `page` (1-based).
    ///
    /// Pages past the end of the template reuse its last page.
    pub fn select_overlay(&self, page: usize) -> Option<usize> {
        if page == 0 || self.source_page_count == 0 {
            return None;
        }
        Some(page.min(self.source_page_count))
    }
}
