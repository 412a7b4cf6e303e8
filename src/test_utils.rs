//! A scripted [`PageSurface`] for renderer tests.

use pdfmaker_render_core::{CellAttributes, PageSurface, RenderError};
use std::collections::BTreeSet;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    StyleVariant(String),
    FontSize(f32),
    Text { content: String, variant: String, font_size: f32, page: usize },
    Cell { content: String, attrs: CellAttributes, variant: String, page: usize },
    Stamp { page: usize, template_page: usize },
    Finalize,
}

/// Records every call. Page breaks and failures are triggered by content.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    page: usize,
    variant: String,
    font_size: f32,
    break_before: BTreeSet<String>,
    fail_on: BTreeSet<String>,
    warn_on: BTreeSet<String>,
    pending_breaks: Vec<usize>,
    pending_warnings: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { page: 1, font_size: 9.0, ..Default::default() }
    }

    /// Starts a new page before drawing `content`.
    pub fn break_before(mut self, content: &str) -> Self {
        self.break_before.insert(content.to_string());
        self
    }

    /// Fails the draw of `content`, after any page break it triggers.
    pub fn fail_on(mut self, content: &str) -> Self {
        self.fail_on.insert(content.to_string());
        self
    }

    /// Reports a warning when drawing `content`.
    pub fn warn_on(mut self, content: &str) -> Self {
        self.warn_on.insert(content.to_string());
        self
    }

    pub fn texts(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Text { content, variant, .. } => {
                    Some((content.clone(), variant.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn cells(&self) -> Vec<(String, CellAttributes)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Cell { content, attrs, .. } => Some((content.clone(), attrs.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn stamps(&self) -> Vec<(usize, usize)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Stamp { page, template_page } => Some((*page, *template_page)),
                _ => None,
            })
            .collect()
    }

    pub fn finalize_count(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, SurfaceCall::Finalize)).count()
    }

    fn draw(&mut self, content: &str) -> Result<(), RenderError> {
        if self.break_before.contains(content) {
            self.pending_breaks.push(self.page);
            self.page += 1;
        }
        if self.warn_on.contains(content) {
            self.pending_warnings.push(format!("warning for {}", content));
        }
        if self.fail_on.contains(content) {
            return Err(RenderError::Other(format!("cannot draw {}", content)));
        }
        Ok(())
    }
}

impl PageSurface for RecordingSurface {
    fn set_style_variant(&mut self, variant: &str) -> Result<(), RenderError> {
        self.variant = variant.to_string();
        self.calls.push(SurfaceCall::StyleVariant(variant.to_string()));
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), RenderError> {
        self.font_size = size;
        self.calls.push(SurfaceCall::FontSize(size));
        Ok(())
    }

    fn draw_text_run(&mut self, _line_height: f32, content: &str) -> Result<(), RenderError> {
        self.draw(content)?;
        self.calls.push(SurfaceCall::Text {
            content: content.to_string(),
            variant: self.variant.clone(),
            font_size: self.font_size,
            page: self.page,
        });
        Ok(())
    }

    fn draw_cell(&mut self, content: &str, attrs: &CellAttributes) -> Result<(), RenderError> {
        self.draw(content)?;
        self.calls.push(SurfaceCall::Cell {
            content: content.to_string(),
            attrs: attrs.clone(),
            variant: self.variant.clone(),
            page: self.page,
        });
        Ok(())
    }

    fn page_number(&self) -> usize {
        self.page
    }

    fn take_page_breaks(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.pending_breaks)
    }

    fn stamp_template_page(
        &mut self,
        page: usize,
        template_page: usize,
    ) -> Result<(), RenderError> {
        self.calls.push(SurfaceCall::Stamp { page, template_page });
        Ok(())
    }

    fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_warnings)
    }

    fn finalize(&mut self, destination: &mut dyn Write) -> Result<(), RenderError> {
        if self.finalize_count() > 0 {
            return Err(RenderError::Finalized);
        }
        self.calls.push(SurfaceCall::Finalize);
        destination.write_all(b"%recorded")?;
        Ok(())
    }
}
