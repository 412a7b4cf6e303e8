use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Template page {page} is out of range (document has {count} pages)")]
    PageOutOfRange { page: u32, count: usize },
}
