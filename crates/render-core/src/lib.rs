//! Core rendering abstractions for pdfmaker.
//!
//! This crate provides the types shared by the markup renderer and its drawing backends:
//! - `PageSurface` trait abstracting page-drawing primitives
//! - Cell layout and page geometry types
//! - Error type for rendering operations
//! - Shared helpers for font naming, units and text measurement

mod error;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use traits::PageSurface;
pub use types::{Align, CellAttributes, CellBorder, Margins, PageGeometry};
pub use utils::FontVariant;
