pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use pdfmaker::{PdfMaker, Status};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
    pub status: Status,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>, status: Status) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc, status })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render `maker` into memory and reload the result
pub fn render(maker: &PdfMaker) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let mut bytes = Vec::new();
    let status = maker.render_to_writer(&mut bytes)?;
    GeneratedPdf::from_bytes(bytes, status)
}

/// Render markup with the default layout and no template
pub fn render_markup(text: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render(&PdfMaker::new(text, "unused.pdf", None)?)
}
