use crate::error::RenderError;
use crate::types::CellAttributes;
use std::io::Write;

/// A paginating drawing surface, abstracting the PDF-writing primitives the
/// markup renderer needs.
///
/// Pages are numbered from 1. The surface breaks pages on its own when
/// content overflows; every finished page is reported once through
/// [`take_page_breaks`](PageSurface::take_page_breaks) so the caller can stamp
/// a template behind it before the document is finalized.
pub trait PageSurface {
    /// Selects the combined style: any of `B`, `I`, `U` in one string.
    fn set_style_variant(&mut self, variant: &str) -> Result<(), RenderError>;

    /// Font size in points.
    fn set_font_size(&mut self, size: f32) -> Result<(), RenderError>;

    /// Flows `content` from the cursor, wrapping within the margins.
    fn draw_text_run(&mut self, line_height: f32, content: &str) -> Result<(), RenderError>;

    /// Draws `content` as one block laid out by `attrs` and moves the cursor past it.
    fn draw_cell(&mut self, content: &str, attrs: &CellAttributes) -> Result<(), RenderError>;

    /// Number of the page currently being drawn.
    fn page_number(&self) -> usize;

    /// Numbers of pages finished by automatic page breaks since the last call.
    fn take_page_breaks(&mut self) -> Vec<usize>;

    /// Draws page `template_page` of the template document behind the content of `page`.
    fn stamp_template_page(&mut self, page: usize, template_page: usize) -> Result<(), RenderError>;

    /// Non-fatal problems noticed while drawing since the last call.
    fn take_warnings(&mut self) -> Vec<String>;

    /// Writes all pages to `destination`. Called once, after the last draw.
    fn finalize(&mut self, destination: &mut dyn Write) -> Result<(), RenderError>;
}
