use crate::error::MakerError;
use pdfmaker_render_core::{Margins, PageGeometry};
use pdfmaker_render_lopdf::SurfaceSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout settings for a document. Geometry is in millimetres, font sizes in points.
///
/// Deserializes from camelCase JSON; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MakerConfig {
    pub page: PageGeometry,
    pub margins: Margins,
    pub default_font_size: f32,
    /// Size selected while inside `<SMALL>`.
    pub small_font_size: f32,
    /// Line height of free-flowing text.
    pub line_height: f32,
    pub font_family: String,
    /// Gray level of filled cells, 0.0 (black) to 1.0 (white).
    pub cell_fill_gray: f32,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::A4,
            margins: Margins::default(),
            default_font_size: 9.0,
            small_font_size: 6.0,
            line_height: 5.0,
            font_family: "Helvetica".to_string(),
            cell_fill_gray: 0.85,
        }
    }
}

impl MakerConfig {
    pub fn from_json(json: &str) -> Result<Self, MakerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MakerError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Rejects settings no page could be laid out with.
    pub fn validate(&self) -> Result<(), MakerError> {
        let sizes = [
            ("defaultFontSize", self.default_font_size),
            ("smallFontSize", self.small_font_size),
            ("lineHeight", self.line_height),
            ("page.width", self.page.width),
            ("page.height", self.page.height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(MakerError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        let margins = self.margins;
        if margins.left + margins.right >= self.page.width {
            return Err(MakerError::InvalidConfig(
                "horizontal margins leave no room on the page".to_string(),
            ));
        }
        if margins.top + margins.bottom + self.line_height > self.page.height {
            return Err(MakerError::InvalidConfig(
                "vertical margins leave no room for a line".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            geometry: self.page,
            margins: self.margins,
            font_family: self.font_family.clone(),
            font_size: self.default_font_size,
            fill_gray: self.cell_fill_gray.clamp(0.0, 1.0),
        }
    }
}
