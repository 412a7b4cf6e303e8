//! Inline tag language used by pdfmaker documents.
//!
//! A document is plain text with embedded `<TAG attr=value>...</TAG>` markers.
//! This crate splits such text into an ordered stream of [`Token`]s:
//! - `Content` tokens carry the literal text between tags (possibly empty)
//! - `Tag` tokens carry an upper-cased tag name, its attributes, and whether it closes
//!
//! Nothing here knows what a tag means; interpretation happens in the renderer.

mod attributes;
mod token;
mod tokenizer;

pub use attributes::{Attributes, parse_attributes};
pub use token::{Tag, Token};
pub use tokenizer::{Tokens, tokenize};
