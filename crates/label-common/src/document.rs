//! In-memory model of a single parsed label.
//!
//! All coordinates and sizes are in printer dots. Positions already include
//! the label home offset (`^LH`), so a rasterizer never needs to know about it.

use serde::Serialize;

/// One label extracted from a `^XA ... ^XZ` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelDocument {
    /// Drawable elements in markup order.
    pub elements: Vec<LabelElement>,
    /// Print width from `^PW`, if given.
    pub print_width: Option<u32>,
    /// Label length from `^LL`, if given.
    pub label_length: Option<u32>,
    /// `^PO I`: the finished label is rotated by 180 degrees.
    pub inverted: bool,
}

impl LabelDocument {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A drawable field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelElement {
    Text(TextField),
    GraphicBox(GraphicBox),
    GraphicCircle(GraphicCircle),
    GraphicEllipse(GraphicEllipse),
    Barcode128(Barcode128),
}

impl LabelElement {
    pub fn position(&self) -> Position {
        match self {
            LabelElement::Text(f) => f.position,
            LabelElement::GraphicBox(g) => g.position,
            LabelElement::GraphicCircle(g) => g.position,
            LabelElement::GraphicEllipse(g) => g.position,
            LabelElement::Barcode128(b) => b.position,
        }
    }

    /// Whether the element inverts whatever is underneath it (`^FR` / `^LRY`).
    pub fn is_reverse(&self) -> bool {
        match self {
            LabelElement::Text(f) => f.reverse,
            LabelElement::GraphicBox(g) => g.reverse,
            LabelElement::GraphicCircle(g) => g.reverse,
            LabelElement::GraphicEllipse(g) => g.reverse,
            LabelElement::Barcode128(b) => b.reverse,
        }
    }
}

/// How a field origin relates to the drawn content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// `^FO`: origin is the upper-left corner.
    TopLeft,
    /// `^FT`: origin is the left end of the text baseline.
    Baseline,
}

/// Field origin in dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub anchor: Anchor,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            anchor: Anchor::TopLeft,
        }
    }
}

/// Field rotation, clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Normal,
    Rotated90,
    Inverted,
    Rotated270,
}

impl Orientation {
    /// Parse a ZPL orientation letter (`N`, `R`, `I`, `B`).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'N' => Some(Self::Normal),
            'R' => Some(Self::Rotated90),
            'I' => Some(Self::Inverted),
            'B' => Some(Self::Rotated270),
            _ => None,
        }
    }
}

/// Ink colour for graphic fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineColor {
    #[default]
    Black,
    White,
}

impl LineColor {
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'B' => Some(Self::Black),
            'W' => Some(Self::White),
            _ => None,
        }
    }
}

/// Font selection from `^A` or `^CF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontSpec {
    pub name: char,
    pub orientation: Orientation,
    pub height: u32,
    pub width: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: 'A',
            orientation: Orientation::Normal,
            height: 9,
            width: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextField {
    pub position: Position,
    pub font: FontSpec,
    pub text: String,
    pub reverse: bool,
}

/// `^GB`: rectangle outline, or a solid bar when thickness covers it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphicBox {
    pub position: Position,
    pub width: u32,
    pub height: u32,
    pub thickness: u32,
    pub color: LineColor,
    pub rounding: u8,
    pub reverse: bool,
}

/// `^GC`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphicCircle {
    pub position: Position,
    pub diameter: u32,
    pub thickness: u32,
    pub color: LineColor,
    pub reverse: bool,
}

/// `^GE`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphicEllipse {
    pub position: Position,
    pub width: u32,
    pub height: u32,
    pub thickness: u32,
    pub color: LineColor,
    pub reverse: bool,
}

/// `^BC` Code 128 barcode, sized by the `^BY` defaults in effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Barcode128 {
    pub position: Position,
    pub orientation: Orientation,
    pub module_width: u32,
    pub height: u32,
    pub interpretation_line: bool,
    pub interpretation_above: bool,
    pub data: String,
    pub reverse: bool,
}
