//! PDF page surface using lopdf.
//!
//! This crate provides the concrete [`PageSurface`](pdfmaker_render_core::PageSurface)
//! used by pdfmaker: pages are assembled in memory, template pages are
//! imported as Form XObjects, and the finished document is written once.

mod page;
mod surface;

pub use surface::{LopdfSurface, SurfaceSettings};
