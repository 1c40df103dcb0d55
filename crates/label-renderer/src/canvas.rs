//! Monochrome drawing surface.
//!
//! Every element is rasterised into its own coverage mask (non-zero means
//! "covered") and then composited onto the label with an [`Ink`]. Reverse
//! fields use [`Ink::Invert`] against whatever is already drawn.
//!
//! Masks only ever cover the part of an element that lands on the printable
//! area. Builders receive a [`Window`] into the element's full extent and
//! allocate just that, so field sizes in the markup never drive allocation.

use image::{imageops, GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use label_common::Orientation;

/// Paper colour.
pub const WHITE: u8 = 255;
/// Ink colour.
pub const BLACK: u8 = 0;

/// How covered mask pixels change the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Black,
    White,
    /// Flip black and white (`^FR`).
    Invert,
}

/// Visible part of an element, in the element's own upright coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x: u64,
    pub y: u64,
    pub width: u32,
    pub height: u32,
}

impl Window {
    /// Window covering a whole `width` x `height` element.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Fill `[x0, x1) x [y0, y1)`, given in element coordinates, on a mask
    /// backing this window. Parts outside the window are dropped.
    pub fn fill(&self, mask: &mut GrayImage, x0: u64, y0: u64, x1: u64, y1: u64, value: u8) {
        let right = self.x + self.width as u64;
        let bottom = self.y + self.height as u64;

        let lx0 = x0.max(self.x);
        let ly0 = y0.max(self.y);
        let lx1 = x1.min(right);
        let ly1 = y1.min(bottom);
        if lx0 >= lx1 || ly0 >= ly1 {
            return;
        }

        let rect = Rect::at((lx0 - self.x) as i32, (ly0 - self.y) as i32)
            .of_size((lx1 - lx0) as u32, (ly1 - ly0) as u32);
        draw_filled_rect_mut(mask, rect, Luma([value]));
    }

    /// Map a window taken from the rotated element back into the upright
    /// element of size `width` x `height`.
    pub fn unrotate(self, orientation: Orientation, width: u64, height: u64) -> Self {
        let (w, h) = (self.width as u64, self.height as u64);
        match orientation {
            Orientation::Normal => self,
            Orientation::Rotated90 => Self {
                x: self.y,
                y: height - self.x - w,
                width: self.height,
                height: self.width,
            },
            Orientation::Inverted => Self {
                x: width - self.x - w,
                y: height - self.y - h,
                ..self
            },
            Orientation::Rotated270 => Self {
                x: width - self.y - h,
                y: self.x,
                width: self.height,
                height: self.width,
            },
        }
    }
}

/// Rotate an upright mask into field orientation.
pub fn orient(mask: GrayImage, orientation: Orientation) -> GrayImage {
    match orientation {
        Orientation::Normal => mask,
        Orientation::Rotated90 => imageops::rotate90(&mask),
        Orientation::Inverted => imageops::rotate180(&mask),
        Orientation::Rotated270 => imageops::rotate270(&mask),
    }
}

/// Label surface in printer dots.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: GrayImage,
    printable: (u32, u32),
}

impl Canvas {
    /// A blank (white) canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([WHITE])),
            printable: (width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[0]
    }

    /// Restrict drawing to the top-left `width` x `height` dots (`^PW`, `^LL`).
    pub fn limit_printable(&mut self, width: Option<u32>, height: Option<u32>) {
        let (w, h) = self.printable;
        self.printable = (
            width.map_or(w, |pw| pw.min(w)),
            height.map_or(h, |ll| ll.min(h)),
        );
    }

    /// Part of a `width` x `height` box at `(x, y)` that lands on the
    /// printable area, relative to the box origin.
    pub fn visible_window(&self, x: i64, y: i64, width: u64, height: u64) -> Option<Window> {
        let extent = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(extent(width)).min(self.printable.0 as i64);
        let y1 = y.saturating_add(extent(height)).min(self.printable.1 as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(Window {
            x: (x0 - x) as u64,
            y: (y0 - y) as u64,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Apply `mask` with its upper-left corner at `(x, y)`. Parts of the
    /// mask outside the printable area are clipped.
    pub fn composite(&mut self, mask: &GrayImage, x: i64, y: i64, ink: Ink) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + mask.width() as i64).min(self.printable.0 as i64);
        let y1 = (y + mask.height() as i64).min(self.printable.1 as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for cy in y0..y1 {
            for cx in x0..x1 {
                let covered = mask.get_pixel((cx - x) as u32, (cy - y) as u32).0[0] != 0;
                if !covered {
                    continue;
                }
                let pixel = self.image.get_pixel_mut(cx as u32, cy as u32);
                pixel.0[0] = match ink {
                    Ink::Black => BLACK,
                    Ink::White => WHITE,
                    Ink::Invert => WHITE - pixel.0[0],
                };
            }
        }
    }

    /// Rotate the whole label by 180 degrees (`^POI`).
    pub fn rotate_180(&mut self) {
        imageops::rotate180_in_place(&mut self.image);
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_mask(w: u32, h: u32) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([255]))
    }

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::new(4, 3);
        assert!(canvas.as_raw().iter().all(|&p| p == WHITE));
        assert_eq!((canvas.width(), canvas.height()), (4, 3));
    }

    #[test]
    fn test_composite_clips_negative_origin() {
        let mut canvas = Canvas::new(4, 4);
        canvas.composite(&solid_mask(3, 3), -1, -1, Ink::Black);

        assert_eq!(canvas.pixel(0, 0), BLACK);
        assert_eq!(canvas.pixel(1, 1), BLACK);
        assert_eq!(canvas.pixel(2, 2), WHITE);
    }

    #[test]
    fn test_composite_fully_outside_is_noop() {
        let mut canvas = Canvas::new(4, 4);
        canvas.composite(&solid_mask(2, 2), 10, 10, Ink::Black);
        assert!(canvas.as_raw().iter().all(|&p| p == WHITE));
    }

    #[test]
    fn test_invert_flips_existing_ink() {
        let mut canvas = Canvas::new(4, 1);
        canvas.composite(&solid_mask(2, 1), 0, 0, Ink::Black);
        canvas.composite(&solid_mask(4, 1), 0, 0, Ink::Invert);

        assert_eq!(canvas.pixel(0, 0), WHITE);
        assert_eq!(canvas.pixel(1, 0), WHITE);
        assert_eq!(canvas.pixel(2, 0), BLACK);
        assert_eq!(canvas.pixel(3, 0), BLACK);
    }

    #[test]
    fn test_rotate_180() {
        let mut canvas = Canvas::new(3, 2);
        canvas.composite(&solid_mask(1, 1), 0, 0, Ink::Black);
        canvas.rotate_180();
        assert_eq!(canvas.pixel(2, 1), BLACK);
        assert_eq!(canvas.pixel(0, 0), WHITE);
    }

    #[test]
    fn test_printable_area_clips_drawing() {
        let mut canvas = Canvas::new(10, 10);
        canvas.limit_printable(Some(4), None);
        canvas.composite(&solid_mask(10, 10), 0, 0, Ink::Black);

        assert_eq!(canvas.pixel(3, 9), BLACK);
        assert_eq!(canvas.pixel(4, 0), WHITE);
    }

    #[test]
    fn test_printable_area_never_grows() {
        let mut canvas = Canvas::new(10, 10);
        canvas.limit_printable(Some(50), Some(50));
        assert_eq!(canvas.visible_window(0, 0, 100, 100), Some(Window::full(10, 10)));
    }

    #[test]
    fn test_visible_window_of_huge_element() {
        let canvas = Canvas::new(80, 80);
        let window = canvas.visible_window(-5, 20, u64::MAX, 2_000_000_000).unwrap();
        assert_eq!(
            window,
            Window {
                x: 5,
                y: 0,
                width: 80,
                height: 60
            }
        );
        assert_eq!(canvas.visible_window(100, 0, 10, 10), None);
    }

    #[test]
    fn test_window_fill_is_clipped() {
        let window = Window {
            x: 10,
            y: 10,
            width: 4,
            height: 4,
        };
        let mut mask = GrayImage::new(4, 4);
        window.fill(&mut mask, 0, 0, 12, u64::MAX, 255);

        assert_eq!(mask.get_pixel(1, 3).0[0], 255);
        assert_eq!(mask.get_pixel(2, 0).0[0], 0);
    }

    #[test]
    fn test_unrotated_window_matches_rotated_mask() {
        // upright 6x4 element with one marked pixel at (1, 0)
        let mut upright = GrayImage::new(6, 4);
        upright.put_pixel(1, 0, Luma([255]));

        for orientation in [
            Orientation::Normal,
            Orientation::Rotated90,
            Orientation::Inverted,
            Orientation::Rotated270,
        ] {
            let rotated = orient(upright.clone(), orientation);
            let (rw, rh) = rotated.dimensions();
            // every 2x2 window of the rotated element
            for vy in 0..rh - 1 {
                for vx in 0..rw - 1 {
                    let window = Window {
                        x: vx as u64,
                        y: vy as u64,
                        width: 2,
                        height: 2,
                    }
                    .unrotate(orientation, 6, 4);
                    let crop = imageops::crop_imm(
                        &upright,
                        window.x as u32,
                        window.y as u32,
                        window.width,
                        window.height,
                    )
                    .to_image();
                    let expected = imageops::crop_imm(&rotated, vx, vy, 2, 2).to_image();
                    assert_eq!(orient(crop, orientation), expected, "{orientation:?}");
                }
            }
        }
    }
}
