//! Renders text with a small inline tag language into PDF pages.
//!
//! Recognized tags:
//! - `<B>`, `<I>`, `<U>` toggle bold, italic and underline; they count, so nested
//!   opens need as many closes
//! - `<SMALL>` switches to the small font size until the next `</SMALL>`
//! - `<CELL w=.. h=.. border=.. align=.. fill=..>` draws each piece of text inside it as a cell
//!
//! Unknown tags are ignored. Generated pages can be drawn over the pages of a
//! template PDF; the last template page repeats for any further pages.

mod cell;
mod config;
mod error;
mod maker;
mod renderer;
mod status;
mod style;
mod template;

#[cfg(test)]
mod test_utils;

pub use cell::{CellController, CellMode, cell_attributes};
pub use config::MakerConfig;
pub use error::MakerError;
pub use maker::PdfMaker;
pub use renderer::{PageRenderer, RenderState};
pub use status::Status;
pub use style::{FontSizeState, StyleState, StyleTag};
pub use template::TemplateDescriptor;

pub use pdfmaker_composer::{ComposerError, TemplateDocument};
pub use pdfmaker_markup::{Attributes, Tag, Token, parse_attributes, tokenize};
pub use pdfmaker_render_core::{
    Align, CellAttributes, CellBorder, Margins, PageGeometry, PageSurface, RenderError,
};
pub use pdfmaker_render_lopdf::{LopdfSurface, SurfaceSettings};
