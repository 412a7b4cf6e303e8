use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

/// Drawing operations collected for a single page.
///
/// Coordinates are PDF user space: points, origin at the bottom-left corner.
#[derive(Debug, Default)]
pub(crate) struct PageContext {
    operations: Vec<Operation>,
    underlay: Option<String>,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the Form XObject painted before everything else on this page.
    pub fn set_underlay(&mut self, xobject_name: String) {
        self.underlay = Some(xobject_name);
    }

    pub fn underlay(&self) -> Option<&str> {
        self.underlay.as_deref()
    }

    pub fn text(&mut self, font: &str, size: f32, x: f32, y: f32, encoded: Vec<u8>) {
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]);
        self.push("Td", vec![x.into(), y.into()]);
        self.push("Tj", vec![Object::String(encoded, StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    /// Paints a rectangle. `fill_gray` fills it, `stroke_width` outlines it.
    pub fn rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill_gray: Option<f32>,
        stroke_width: Option<f32>,
    ) {
        if let Some(gray) = fill_gray {
            self.push("g", vec![gray.into()]);
        }
        if let Some(line_width) = stroke_width {
            self.push("w", vec![line_width.into()]);
        }
        self.push("re", vec![x.into(), y.into(), width.into(), height.into()]);
        let paint = match (fill_gray.is_some(), stroke_width.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            (false, true) => "S",
            (false, false) => "n",
        };
        self.push(paint, vec![]);
        if fill_gray.is_some() {
            self.push("g", vec![0.into()]);
        }
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32) {
        self.push("w", vec![line_width.into()]);
        self.push("m", vec![x1.into(), y1.into()]);
        self.push("l", vec![x2.into(), y2.into()]);
        self.push("S", vec![]);
    }

    pub fn into_content(self) -> Content {
        let mut operations = Vec::with_capacity(self.operations.len() + 3);
        if let Some(name) = self.underlay {
            operations.push(Operation::new("q", vec![]));
            operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
            operations.push(Operation::new("Q", vec![]));
        }
        operations.extend(self.operations);
        Content { operations }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }
}
