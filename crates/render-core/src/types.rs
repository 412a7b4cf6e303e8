use serde::{Deserialize, Serialize};

/// Horizontal alignment of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Accepts `L`/`LEFT`, `C`/`CENTER` and `R`/`RIGHT` in any case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "L" | "LEFT" => Some(Align::Left),
            "C" | "CENTER" => Some(Align::Center),
            "R" | "RIGHT" => Some(Align::Right),
            _ => None,
        }
    }
}

/// Which sides of a cell get a border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellBorder {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl CellBorder {
    pub const NONE: CellBorder =
        CellBorder { left: false, top: false, right: false, bottom: false };
    pub const FRAME: CellBorder = CellBorder { left: true, top: true, right: true, bottom: true };

    /// Parses a border value: `0` for none, `1` for a full frame, or any
    /// combination of the side letters `L`, `T`, `R`, `B`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_uppercase();
        match value.as_str() {
            "0" | "" => return Some(CellBorder::NONE),
            "1" => return Some(CellBorder::FRAME),
            _ => {}
        }
        let mut border = CellBorder::NONE;
        for side in value.chars() {
            match side {
                'L' => border.left = true,
                'T' => border.top = true,
                'R' => border.right = true,
                'B' => border.bottom = true,
                _ => return None,
            }
        }
        Some(border)
    }

    pub fn is_none(&self) -> bool {
        *self == CellBorder::NONE
    }

    pub fn is_frame(&self) -> bool {
        *self == CellBorder::FRAME
    }
}

/// Layout of a block drawn in cell mode. Geometry is in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct CellAttributes {
    /// Cell width; `0` extends the cell to the right margin.
    pub width: f32,
    pub height: f32,
    pub border: CellBorder,
    pub align: Align,
    pub fill: bool,
}

impl CellAttributes {
    pub const DEFAULT_HEIGHT: f32 = 5.0;
}

impl Default for CellAttributes {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: Self::DEFAULT_HEIGHT,
            border: CellBorder::NONE,
            align: Align::Left,
            fill: false,
        }
    }
}

/// Page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry { width: 210.0, height: 297.0 };
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4
    }
}

/// Page margins in millimetres. `bottom` is also the automatic page-break distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    /// Symmetric horizontal margins, as the document layout uses them.
    pub fn new(top: f32, left: f32, bottom: f32) -> Self {
        Self { top, left, right: left, bottom }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::new(10.0, 10.0, 20.0)
    }
}
