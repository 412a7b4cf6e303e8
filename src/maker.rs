use crate::config::MakerConfig;
use crate::error::MakerError;
use crate::renderer::{PageRenderer, RenderState};
use crate::status::Status;
use crate::template::TemplateDescriptor;
use pdfmaker_composer::TemplateDocument;
use pdfmaker_render_core::Margins;
use pdfmaker_render_lopdf::LopdfSurface;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders one marked-up text into a PDF file, optionally over the pages of a template.
///
/// ```no_run
/// use pdfmaker::PdfMaker;
///
/// let maker = PdfMaker::new("Total: <B>42</B>", "invoice.pdf", None)?
///     .with_small_font_size(7.0);
/// let status = maker.create()?;
/// if status.is_error() {
///     eprintln!("{}", status);
/// }
/// # Ok::<(), pdfmaker::MakerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PdfMaker {
    text: String,
    destination: PathBuf,
    template: Option<TemplateDocument>,
    config: MakerConfig,
}

impl PdfMaker {
    /// Loads the template, if any. An unreadable or unparsable template is an error here,
    /// before anything is drawn.
    pub fn new(
        text: impl Into<String>,
        destination: impl Into<PathBuf>,
        template: Option<&Path>,
    ) -> Result<Self, MakerError> {
        let template = template.map(TemplateDocument::load).transpose()?;
        if let Some(doc) = &template {
            log::debug!("Loaded template with {} page(s)", doc.page_count());
        }
        Ok(Self {
            text: text.into(),
            destination: destination.into(),
            template,
            config: MakerConfig::default(),
        })
    }

    /// Uses an already loaded template document.
    pub fn with_template(mut self, template: TemplateDocument) -> Self {
        self.template = Some(template);
        self
    }

    /// Uses a template held in memory.
    pub fn with_template_bytes(self, bytes: &[u8]) -> Result<Self, MakerError> {
        let template = TemplateDocument::from_bytes(bytes)?;
        Ok(self.with_template(template))
    }

    pub fn with_config(mut self, config: MakerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.config.default_font_size = size;
        self
    }

    pub fn with_small_font_size(mut self, size: f32) -> Self {
        self.config.small_font_size = size;
        self
    }

    /// Top, left and bottom margins in millimetres. The right margin follows the left one.
    pub fn with_margins(mut self, top: f32, left: f32, bottom: f32) -> Self {
        self.config.margins = Margins::new(top, left, bottom);
        self
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Pages in the template, or 0 without one.
    pub fn template_page_count(&self) -> usize {
        self.template.as_ref().map_or(0, TemplateDocument::page_count)
    }

    /// Renders the document and writes it to the destination file.
    ///
    /// Problems met while drawing do not fail the call; they come back in the [`Status`].
    pub fn create(&self) -> Result<Status, MakerError> {
        let mut buffer = Vec::new();
        let status = self.render_to_writer(&mut buffer)?;
        if buffer.is_empty() {
            log::warn!("Nothing was rendered, not writing {}", self.destination.display());
            return Ok(status);
        }
        fs::write(&self.destination, &buffer)?;
        log::info!("Wrote {} bytes to {}", buffer.len(), self.destination.display());
        Ok(status)
    }

    /// Renders the document into `destination` instead of the configured file.
    pub fn render_to_writer(&self, destination: &mut dyn Write) -> Result<Status, MakerError> {
        self.config.validate()?;

        let descriptor = TemplateDescriptor::new(self.template_page_count());
        let mut surface = LopdfSurface::new(self.config.surface_settings(), self.template.as_ref());
        let state = RenderState::new(self.config.default_font_size, self.config.small_font_size);
        let renderer = PageRenderer::new(&mut surface, descriptor, state, self.config.line_height);
        Ok(renderer.render(&self.text, destination))
    }
}
