//! Coverage masks for graphic fields.
//!
//! Each builder draws only the part of the shape inside `window`.

use image::{GrayImage, Luma};

use crate::canvas::Window;

const ON: u8 = 255;
const OFF: u8 = 0;

/// Rectangle outline of the given border thickness. A thickness of at least
/// half the shorter side yields a solid bar.
pub fn box_mask(width: u64, height: u64, thickness: u64, window: Window) -> GrayImage {
    let mut mask = GrayImage::from_pixel(window.width, window.height, Luma([ON]));

    let border = thickness.saturating_mul(2);
    if width > border && height > border {
        window.fill(
            &mut mask,
            thickness,
            thickness,
            width - thickness,
            height - thickness,
            OFF,
        );
    }

    mask
}

/// Circle ring fitting a `diameter` square.
pub fn circle_mask(diameter: u64, thickness: u64, window: Window) -> GrayImage {
    ellipse_mask(diameter, diameter, thickness, window)
}

/// Ellipse ring fitting a `width` x `height` box. Pixels are tested at
/// their centres against the outer and inner ellipse.
pub fn ellipse_mask(width: u64, height: u64, thickness: u64, window: Window) -> GrayImage {
    let rx = width.max(1) as f64 / 2.0;
    let ry = height.max(1) as f64 / 2.0;
    let inner_rx = rx - thickness as f64;
    let inner_ry = ry - thickness as f64;
    let hollow = inner_rx > 0.0 && inner_ry > 0.0;

    let mut mask = GrayImage::new(window.width, window.height);
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        let dx = (window.x + x as u64) as f64 + 0.5 - rx;
        let dy = (window.y + y as u64) as f64 + 0.5 - ry;

        let outside = (dx / rx).powi(2) + (dy / ry).powi(2) > 1.0;
        let in_hole = hollow && (dx / inner_rx).powi(2) + (dy / inner_ry).powi(2) < 1.0;
        if !outside && !in_hole {
            *pixel = Luma([ON]);
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(mask: &GrayImage, x: u32, y: u32) -> bool {
        mask.get_pixel(x, y).0[0] != 0
    }

    #[test]
    fn test_box_outline_has_hollow_center() {
        let mask = box_mask(10, 8, 2, Window::full(10, 8));
        assert!(covered(&mask, 0, 0));
        assert!(covered(&mask, 9, 7));
        assert!(covered(&mask, 1, 4));
        assert!(!covered(&mask, 5, 4));
    }

    #[test]
    fn test_thick_box_is_solid() {
        let mask = box_mask(6, 6, 3, Window::full(6, 6));
        assert!(mask.pixels().all(|p| p.0[0] != 0));
    }

    #[test]
    fn test_huge_thickness_is_solid() {
        let mask = box_mask(30_000, 30_000, u32::MAX as u64, Window::full(80, 80));
        assert!(mask.pixels().all(|p| p.0[0] != 0));
    }

    #[test]
    fn test_box_window_sees_only_the_border_it_covers() {
        // top-left corner of a big outline, 1-dot border
        let mask = box_mask(30_000, 30_000, 1, Window::full(80, 80));
        assert_eq!(mask.dimensions(), (80, 80));
        assert!(covered(&mask, 0, 40));
        assert!(covered(&mask, 40, 0));
        assert!(!covered(&mask, 40, 40));
    }

    #[test]
    fn test_circle_ring() {
        let mask = circle_mask(40, 3, Window::full(40, 40));
        assert!(!covered(&mask, 20, 20));
        assert!(covered(&mask, 20, 1));
        assert!(!covered(&mask, 0, 0));
    }

    #[test]
    fn test_circle_window_inside_ring_hole() {
        let window = Window {
            x: 14_000,
            y: 14_000,
            width: 100,
            height: 100,
        };
        let mask = circle_mask(30_000, 5, window);
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_filled_ellipse() {
        let mask = ellipse_mask(30, 10, 10, Window::full(30, 10));
        assert!(covered(&mask, 15, 5));
        assert!(!covered(&mask, 0, 0));
    }
}
