//! Label rasterization.
//!
//! Draws a parsed label onto a monochrome canvas sized from the physical
//! label geometry and encodes it as PNG:
//! - Text fields (built-in bitmap face, four orientations)
//! - Boxes, circles and ellipses
//! - Code 128 barcodes with interpretation line
//! - Reverse fields and inverted print orientation
//! - Print width / label length limits on the drawable area

pub mod barcode;
pub mod canvas;
pub mod font;
pub mod png;
pub mod shapes;

use image::GrayImage;
use label_common::{
    Anchor, LabelDocument, LabelElement, LineColor, Orientation, Position, Rasterizer,
    RenderError, RenderOptions, RenderResult,
};
use tracing::debug;

use canvas::{orient, Canvas, Ink, Window};

/// Largest canvas side accepted, in dots.
pub const MAX_CANVAS_DOTS: u32 = 32_000;

/// [`Rasterizer`] producing greyscale PNG images.
#[derive(Debug, Clone)]
pub struct LabelRenderer {
    max_canvas_dots: u32,
}

impl Default for LabelRenderer {
    fn default() -> Self {
        Self {
            max_canvas_dots: MAX_CANVAS_DOTS,
        }
    }
}

impl LabelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the per-side canvas limit.
    pub fn with_max_canvas_dots(mut self, max: u32) -> Self {
        self.max_canvas_dots = max;
        self
    }

    /// Canvas size in dots for the requested geometry.
    pub fn canvas_size(&self, options: &RenderOptions) -> RenderResult<(u32, u32)> {
        let invalid = || RenderError::InvalidGeometry {
            width_mm: options.label_width_mm,
            height_mm: options.label_height_mm,
            dpmm: options.dpmm,
        };

        if !(options.label_width_mm > 0.0 && options.label_height_mm > 0.0 && options.dpmm > 0) {
            return Err(invalid());
        }

        let dpmm = options.dpmm as f64;
        let width = (options.label_width_mm * dpmm).round();
        let height = (options.label_height_mm * dpmm).round();
        if width < 1.0 || height < 1.0 {
            return Err(invalid());
        }

        let max = self.max_canvas_dots as f64;
        if width > max || height > max {
            return Err(RenderError::CanvasTooLarge {
                width: width as u64,
                height: height as u64,
                max: self.max_canvas_dots,
            });
        }

        Ok((width as u32, height as u32))
    }

    /// Draw the label without encoding it.
    pub fn rasterize(&self, label: &LabelDocument, options: &RenderOptions) -> RenderResult<Canvas> {
        let (width, height) = self.canvas_size(options)?;
        let mut canvas = Canvas::new(width, height);
        canvas.limit_printable(label.print_width, label.label_length);

        for element in &label.elements {
            draw_element(&mut canvas, element)?;
        }

        if label.inverted {
            canvas.rotate_180();
        }

        debug!(
            width = width,
            height = height,
            elements = label.elements.len(),
            "Rasterized label"
        );
        Ok(canvas)
    }
}

impl Rasterizer for LabelRenderer {
    fn render_png(&self, label: &LabelDocument, options: &RenderOptions) -> RenderResult<Vec<u8>> {
        let canvas = self.rasterize(label, options)?;
        let (width, height) = (canvas.width() as usize, canvas.height() as usize);
        png::create_png_grayscale(canvas.as_raw(), width, height).map_err(RenderError::Encoding)
    }
}

fn ink_for(color: LineColor, reverse: bool) -> Ink {
    match (reverse, color) {
        (true, _) => Ink::Invert,
        (false, LineColor::Black) => Ink::Black,
        (false, LineColor::White) => Ink::White,
    }
}

fn draw_element(canvas: &mut Canvas, element: &LabelElement) -> RenderResult<()> {
    let position = element.position();
    match element {
        LabelElement::Text(field) => {
            let (height, width) = (field.font.height as u64, field.font.width as u64);
            let top_offset = match position.anchor {
                Anchor::TopLeft => 0,
                Anchor::Baseline => font::baseline_offset(height),
            };
            place(
                canvas,
                position,
                top_offset,
                font::text_size(&field.text, height, width),
                field.font.orientation,
                ink_for(LineColor::Black, field.reverse),
                |window| font::text_mask(&field.text, height, width, window),
            );
        }
        LabelElement::GraphicBox(gb) => {
            let (width, height) = (gb.width as u64, gb.height as u64);
            place(
                canvas,
                position,
                0,
                (width.max(1), height.max(1)),
                Orientation::Normal,
                ink_for(gb.color, gb.reverse),
                |window| shapes::box_mask(width, height, gb.thickness as u64, window),
            );
        }
        LabelElement::GraphicCircle(gc) => {
            let diameter = gc.diameter.max(1) as u64;
            place(
                canvas,
                position,
                0,
                (diameter, diameter),
                Orientation::Normal,
                ink_for(gc.color, gc.reverse),
                |window| shapes::circle_mask(diameter, gc.thickness as u64, window),
            );
        }
        LabelElement::GraphicEllipse(ge) => {
            let (width, height) = (ge.width.max(1) as u64, ge.height.max(1) as u64);
            place(
                canvas,
                position,
                0,
                (width, height),
                Orientation::Normal,
                ink_for(ge.color, ge.reverse),
                |window| shapes::ellipse_mask(width, height, ge.thickness as u64, window),
            );
        }
        LabelElement::Barcode128(bc) => {
            let symbol = barcode::Symbol::new(bc)?;
            // ^FT places the bottom of the bars on the origin
            let top_offset = match position.anchor {
                Anchor::TopLeft => 0,
                Anchor::Baseline => bc.height as u64,
            };
            place(
                canvas,
                position,
                top_offset,
                symbol.size(),
                bc.orientation,
                ink_for(LineColor::Black, bc.reverse),
                |window| symbol.mask(window),
            );
        }
    }
    Ok(())
}

/// Composite the visible part of an element whose upright extent is `size`.
/// `build` only ever sees the window that lands on the printable area.
fn place(
    canvas: &mut Canvas,
    position: Position,
    top_offset: u64,
    size: (u64, u64),
    orientation: Orientation,
    ink: Ink,
    build: impl FnOnce(Window) -> GrayImage,
) {
    let (width, height) = size;
    let (oriented_width, oriented_height) = match orientation {
        Orientation::Rotated90 | Orientation::Rotated270 => (height, width),
        Orientation::Normal | Orientation::Inverted => (width, height),
    };

    let x = position.x as i64;
    let y = (position.y as i64).saturating_sub(i64::try_from(top_offset).unwrap_or(i64::MAX));
    let Some(visible) = canvas.visible_window(x, y, oriented_width, oriented_height) else {
        return;
    };

    let mask = orient(build(visible.unrotate(orientation, width, height)), orientation);
    canvas.composite(&mask, x + visible.x as i64, y + visible.y as i64, ink);
}
