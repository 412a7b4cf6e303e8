use pdfmaker_composer::ComposerError;
use thiserror::Error;

/// Failures that prevent a document from being produced at all.
///
/// Problems inside the markup or with individual draw calls never end up
/// here; they are collected into a [`Status`](crate::Status) instead.
#[derive(Error, Debug)]
pub enum MakerError {
    #[error("Template could not be loaded: {0}")]
    Template(#[from] ComposerError),

    #[error("Configuration is invalid: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid layout setting: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
