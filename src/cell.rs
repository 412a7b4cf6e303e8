//! Cell mode: redirects content into bordered, aligned blocks between `<CELL>` and `</CELL>`.

use pdfmaker_markup::Attributes;
use pdfmaker_render_core::{Align, CellAttributes, CellBorder};

/// Where literal content goes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellMode {
    /// Content flows as wrapped text at the cursor.
    #[default]
    FreeText,
    /// Every content segment is drawn as one cell with these attributes.
    InCell(CellAttributes),
}

/// Tracks cell mode and the line break to swallow after a cell closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellController {
    mode: CellMode,
    skip_leading_break: bool,
}

impl CellController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters cell mode. An already open cell is replaced.
    pub fn open(&mut self, attributes: &Attributes) {
        if matches!(self.mode, CellMode::InCell(_)) {
            log::debug!("Nested <CELL> replaces the open cell");
        }
        let attrs = cell_attributes(attributes);
        log::debug!("Entering cell mode with {:?}", attrs);
        self.mode = CellMode::InCell(attrs);
    }

    /// Leaves cell mode and arms the leading-break skip.
    pub fn close(&mut self) {
        self.mode = CellMode::FreeText;
        self.skip_leading_break = true;
    }

    pub fn mode(&self) -> &CellMode {
        &self.mode
    }

    pub fn active(&self) -> Option<&CellAttributes> {
        match &self.mode {
            CellMode::InCell(attrs) => Some(attrs),
            CellMode::FreeText => None,
        }
    }

    pub fn skip_leading_break(&self) -> bool {
        self.skip_leading_break
    }

    /// Strips one leading `\r\n` or `\n` from the first content after a cell.
    ///
    /// Empty segments pass through untouched. The skip stays armed until a
    /// segment with visible text has been seen.
    pub fn prepare_content<'c>(&mut self, content: &'c str) -> &'c str {
        if !self.skip_leading_break || content.is_empty() {
            return content;
        }
        let stripped = content
            .strip_prefix("\r\n")
            .or_else(|| content.strip_prefix('\n'))
            .unwrap_or(content);
        if !stripped.trim().is_empty() {
            self.skip_leading_break = false;
        }
        stripped
    }
}

/// Builds cell attributes from a `<CELL>` tag over the defaults.
///
/// Values are compared upper-cased. Missing or unparsable values keep their default.
pub fn cell_attributes(attributes: &Attributes) -> CellAttributes {
    let mut cell = CellAttributes::default();
    for (name, value) in attributes {
        let value = value.to_uppercase();
        match name.as_str() {
            "W" => cell.width = parse_length(&value).unwrap_or(cell.width),
            "H" => cell.height = parse_length(&value).unwrap_or(cell.height),
            "BORDER" => cell.border = CellBorder::parse(&value).unwrap_or(cell.border),
            "ALIGN" => cell.align = Align::parse(&value).unwrap_or(cell.align),
            "FILL" => cell.fill = value.trim() == "1",
            _ => log::debug!("Ignoring cell attribute {}={}", name, value),
        }
    }
    cell
}

fn parse_length(value: &str) -> Option<f32> {
    match value.trim().parse::<f32>() {
        Ok(length) if length.is_finite() && length >= 0.0 => Some(length),
        _ => {
            log::debug!("Ignoring invalid cell length '{}'", value);
            None
        }
    }
}
