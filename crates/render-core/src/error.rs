use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Template error: {0}")]
    Template(String),
    #[error("No template document is loaded")]
    NoTemplate,
    #[error("Page {0} does not exist")]
    PageOutOfRange(usize),
    #[error("Surface has already been finalized")]
    Finalized,
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
