use crate::page::PageContext;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pdfmaker_composer::{PageImporter, TemplateDocument};
use pdfmaker_render_core::utils::{
    K, flip_y, get_styled_font_name, measure_text_width, mm_to_pt, to_win_ansi,
};
use pdfmaker_render_core::{
    Align, CellAttributes, FontVariant, Margins, PageGeometry, PageSurface, RenderError,
};
use std::collections::BTreeMap;
use std::io::Write;

/// Horizontal padding between a cell's edge and its text, in millimetres.
const CELL_PADDING: f32 = 1.0;

/// Border and underline stroke width, in millimetres.
const LINE_WIDTH: f32 = 0.2;

/// Settings fixed for the lifetime of one surface.
#[derive(Debug, Clone)]
pub struct SurfaceSettings {
    pub geometry: PageGeometry,
    pub margins: Margins,
    pub font_family: String,
    /// Initial font size in points.
    pub font_size: f32,
    /// Gray level used for filled cells, 0.0 (black) to 1.0 (white).
    pub fill_gray: f32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::A4,
            margins: Margins::default(),
            font_family: "Helvetica".to_string(),
            font_size: 9.0,
            fill_gray: 0.85,
        }
    }
}

/// A [`PageSurface`] that builds a PDF in memory with `lopdf`.
///
/// Geometry follows the classic single-cursor model: a cursor in millimetres
/// from the top-left corner, text flowing between the left and right margins,
/// and an automatic page break once content would cross the bottom margin.
pub struct LopdfSurface<'t> {
    doc: Document,
    settings: SurfaceSettings,
    importer: Option<PageImporter<'t>>,
    imported: BTreeMap<usize, ObjectId>,
    pages: Vec<PageContext>,
    x: f32,
    y: f32,
    font_size: f32,
    variant: FontVariant,
    page_breaks: Vec<usize>,
    warnings: Vec<String>,
    finalized: bool,
}

impl<'t> LopdfSurface<'t> {
    /// Starts a document on page 1 with the cursor at the top-left margin.
    pub fn new(settings: SurfaceSettings, template: Option<&'t TemplateDocument>) -> Self {
        let x = settings.margins.left;
        let y = settings.margins.top;
        let font_size = settings.font_size;
        Self {
            doc: Document::with_version("1.7"),
            settings,
            importer: template.map(TemplateDocument::importer),
            imported: BTreeMap::new(),
            pages: vec![PageContext::new()],
            x,
            y,
            font_size,
            variant: FontVariant::default(),
            page_breaks: Vec::new(),
            warnings: Vec::new(),
            finalized: false,
        }
    }

    /// Current cursor position in millimetres from the top-left corner.
    pub fn cursor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    fn right_edge(&self) -> f32 {
        self.settings.geometry.width - self.settings.margins.right
    }

    fn page_break_trigger(&self) -> f32 {
        self.settings.geometry.height - self.settings.margins.bottom
    }

    fn text_width(&self, text: &str) -> f32 {
        measure_text_width(text, self.font_size)
    }

    /// Resource name of the font face for the active variant.
    fn font_resource(&self) -> &'static str {
        match (self.variant.bold, self.variant.italic) {
            (false, false) => "F1",
            (true, false) => "F2",
            (false, true) => "F3",
            (true, true) => "F4",
        }
    }

    fn current_page(&mut self) -> &mut PageContext {
        if self.pages.is_empty() {
            self.pages.push(PageContext::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn ensure_open(&self) -> Result<(), RenderError> {
        if self.finalized { Err(RenderError::Finalized) } else { Ok(()) }
    }

    /// Finishes the current page and continues at the top of a new one.
    /// The horizontal cursor position is kept.
    fn break_page(&mut self) {
        let finished = self.pages.len();
        log::debug!("Page {} is full, starting page {}", finished, finished + 1);
        self.page_breaks.push(finished);
        self.pages.push(PageContext::new());
        self.y = self.settings.margins.top;
    }

    fn break_page_if_needed(&mut self, height: f32) {
        if self.y + height > self.page_break_trigger() {
            self.break_page();
        }
    }

    fn new_line(&mut self, line_height: f32) {
        self.x = self.settings.margins.left;
        self.y += line_height;
    }

    /// Draws one line fragment, first breaking the page if the line does not fit.
    fn emit_text(&mut self, x: f32, line_height: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.break_page_if_needed(line_height);
        self.place_text(x, line_height, text);
    }

    /// Draws one fragment whose box starts at (`x`, cursor y) and is
    /// `line_height` tall, on the current page. Text is vertically centred in the box.
    fn place_text(&mut self, x: f32, line_height: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let (encoded, replaced) = to_win_ansi(text);
        if replaced {
            let message = format!("Characters outside WinAnsi replaced with '?' in \"{}\"", text);
            log::warn!("{}", message);
            self.warnings.push(message);
        }

        let size_mm = self.font_size / K;
        let baseline = self.y + 0.5 * line_height + 0.3 * size_mm;
        let page_height = self.settings.geometry.height;
        let font = self.font_resource();
        let font_size = self.font_size;
        let underline = self.variant.underline.then(|| {
            let width = self.text_width(text.trim_end());
            (width, baseline + 0.1 * size_mm, 0.05 * size_mm)
        });

        let page = self.current_page();
        page.text(font, font_size, mm_to_pt(x), flip_y(baseline, page_height), encoded);
        if let Some((width, top, thickness)) = underline {
            page.rect(
                mm_to_pt(x),
                flip_y(top + thickness, page_height),
                mm_to_pt(width),
                mm_to_pt(thickness),
                Some(0.0),
                None,
            );
        }
    }

    /// Flows one line-break-free segment from the cursor, wrapping at spaces.
    fn write_segment(&mut self, line_height: f32, segment: &str) {
        let left = self.settings.margins.left;
        let right = self.right_edge();
        let mut line = String::new();
        let mut line_x = self.x;
        let mut line_width = 0.0;

        for word in segment.split_inclusive(' ') {
            let word_width = self.text_width(word);
            let visible_width = self.text_width(word.trim_end_matches(' '));

            if line_x + line_width + visible_width > right {
                if !line.is_empty() {
                    self.emit_text(line_x, line_height, &line);
                    line.clear();
                    line_width = 0.0;
                    self.new_line(line_height);
                    line_x = self.x;
                } else if line_x > left {
                    self.new_line(line_height);
                    line_x = self.x;
                }

                if line_x + visible_width > right {
                    // Longer than a whole line: split between characters.
                    for ch in word.chars() {
                        let mut buf = [0u8; 4];
                        let char_width = self.text_width(ch.encode_utf8(&mut buf));
                        if line_x + line_width + char_width > right && !line.is_empty() {
                            self.emit_text(line_x, line_height, &line);
                            line.clear();
                            line_width = 0.0;
                            self.new_line(line_height);
                            line_x = self.x;
                        }
                        line.push(ch);
                        line_width += char_width;
                    }
                    continue;
                }
            }

            line.push_str(word);
            line_width += word_width;
        }

        self.emit_text(line_x, line_height, &line);
        self.x = line_x + line_width;
    }

    fn draw_cell_borders(&mut self, x: f32, width: f32, attrs: &CellAttributes) {
        let page_height = self.settings.geometry.height;
        let fill_gray = attrs.fill.then_some(self.settings.fill_gray);
        let frame = attrs.border.is_frame();
        let y = self.y;

        if fill_gray.is_some() || frame {
            let stroke = frame.then_some(mm_to_pt(LINE_WIDTH));
            self.current_page().rect(
                mm_to_pt(x),
                flip_y(y + attrs.height, page_height),
                mm_to_pt(width),
                mm_to_pt(attrs.height),
                fill_gray,
                stroke,
            );
        }
        if frame || attrs.border.is_none() {
            return;
        }

        let (x0, x1) = (mm_to_pt(x), mm_to_pt(x + width));
        let (top, bottom) = (flip_y(y, page_height), flip_y(y + attrs.height, page_height));
        let stroke = mm_to_pt(LINE_WIDTH);
        let page = self.current_page();
        if attrs.border.left {
            page.line(x0, top, x0, bottom, stroke);
        }
        if attrs.border.top {
            page.line(x0, top, x1, top, stroke);
        }
        if attrs.border.right {
            page.line(x1, top, x1, bottom, stroke);
        }
        if attrs.border.bottom {
            page.line(x0, bottom, x1, bottom, stroke);
        }
    }

    fn font_dictionary(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for (resource, variant) in [("F1", ""), ("F2", "B"), ("F3", "I"), ("F4", "BI")] {
            let base_font =
                get_styled_font_name(&self.settings.font_family, FontVariant::parse(variant));
            fonts.set(
                resource,
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => Object::Name(base_font.into_bytes()),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        fonts
    }
}

fn template_resource_name(template_page: usize) -> String {
    format!("Tpl{}", template_page)
}

impl PageSurface for LopdfSurface<'_> {
    fn set_style_variant(&mut self, variant: &str) -> Result<(), RenderError> {
        self.ensure_open()?;
        self.variant = FontVariant::parse(variant);
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), RenderError> {
        self.ensure_open()?;
        if !(size.is_finite() && size > 0.0) {
            return Err(RenderError::Other(format!("Invalid font size {}", size)));
        }
        self.font_size = size;
        Ok(())
    }

    fn draw_text_run(&mut self, line_height: f32, content: &str) -> Result<(), RenderError> {
        self.ensure_open()?;
        let content = content.replace('\r', "");
        let mut segments = content.split('\n').peekable();
        while let Some(segment) = segments.next() {
            self.write_segment(line_height, segment);
            if segments.peek().is_some() {
                self.new_line(line_height);
            }
        }
        Ok(())
    }

    fn draw_cell(&mut self, content: &str, attrs: &CellAttributes) -> Result<(), RenderError> {
        self.ensure_open()?;
        if attrs.height < 0.0 || attrs.width < 0.0 {
            return Err(RenderError::Other(format!(
                "Invalid cell size {}x{}",
                attrs.width, attrs.height
            )));
        }

        let x = self.x;
        self.break_page_if_needed(attrs.height);
        self.x = x;

        let width = if attrs.width == 0.0 { self.right_edge() - x } else { attrs.width };
        self.draw_cell_borders(x, width, attrs);

        let text = content.replace(['\r', '\n'], " ");
        if !text.is_empty() {
            let text_width = self.text_width(&text);
            let text_x = match attrs.align {
                Align::Left => x + CELL_PADDING,
                Align::Center => x + (width - text_width) / 2.0,
                Align::Right => x + width - CELL_PADDING - text_width,
            };
            self.place_text(text_x, attrs.height, &text);
        }

        self.x = x + width;
        Ok(())
    }

    fn page_number(&self) -> usize {
        self.pages.len()
    }

    fn take_page_breaks(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.page_breaks)
    }

    fn stamp_template_page(
        &mut self,
        page: usize,
        template_page: usize,
    ) -> Result<(), RenderError> {
        self.ensure_open()?;
        let importer = self.importer.as_mut().ok_or(RenderError::NoTemplate)?;
        if page == 0 || page > self.pages.len() {
            return Err(RenderError::PageOutOfRange(page));
        }

        if !self.imported.contains_key(&template_page) {
            let number = u32::try_from(template_page).map_err(|_| {
                RenderError::Template(format!("Template page {} is out of range", template_page))
            })?;
            let xobject_id = importer
                .import_page(&mut self.doc, number)
                .map_err(|e| RenderError::Template(e.to_string()))?;
            self.imported.insert(template_page, xobject_id);
        }

        let name = template_resource_name(template_page);
        let target = &mut self.pages[page - 1];
        if let Some(previous) = target.underlay() {
            log::warn!(
                "Page {} already stamped with {}, replacing it with {}",
                page, previous, name
            );
        }
        log::debug!("Stamping template page {} behind page {}", template_page, page);
        target.set_underlay(name);
        Ok(())
    }

    fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn finalize(&mut self, mut destination: &mut dyn Write) -> Result<(), RenderError> {
        self.ensure_open()?;
        self.finalized = true;

        let mut xobjects = Dictionary::new();
        for (template_page, xobject_id) in &self.imported {
            xobjects.set(template_resource_name(*template_page), *xobject_id);
        }
        let fonts = self.font_dictionary();
        let resources_id = self.doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });

        let pages_id = self.doc.new_object_id();
        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            mm_to_pt(self.settings.geometry.width).into(),
            mm_to_pt(self.settings.geometry.height).into(),
        ];
        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in std::mem::take(&mut self.pages) {
            let content = page.into_content().encode()?;
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            pages_id,
            dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }.into(),
        );
        let catalog_id =
            self.doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        self.doc.trailer.set("Root", catalog_id);

        log::debug!("Writing {} pages", count);
        self.doc.save_to(&mut destination)?;
        destination.flush()?;
        Ok(())
    }
}
