//! Tests for greyscale PNG encoding.
//!
//! Output is decoded again with the `image` crate to make sure the
//! hand-written container is accepted by a real decoder.

use label_renderer::png::create_png_grayscale;

// ============================================================================
// Helper functions
// ============================================================================

/// Label-like pixel data: white paper with a black frame and a bar.
fn generate_label_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = vec![255u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let frame = x < 2 || y < 2 || x >= width - 2 || y >= height - 2;
            let bar = (height / 2..height / 2 + 4).contains(&y) && x > width / 4;
            if frame || bar {
                pixels[y * width + x] = 0;
            }
        }
    }
    pixels
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decodes_with_image_crate() {
    let pixels = generate_label_pixels(64, 32);
    let png = create_png_grayscale(&pixels, 64, 32).unwrap();

    let decoded = image::load_from_memory(&png).unwrap().to_luma8();
    assert_eq!(decoded.dimensions(), (64, 32));
    assert_eq!(decoded.as_raw(), &pixels);
}

#[test]
fn test_single_pixel_image() {
    let png = create_png_grayscale(&[0], 1, 1).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_luma8();
    assert_eq!(decoded.get_pixel(0, 0).0[0], 0);
}

// ============================================================================
// Determinism and size
// ============================================================================

#[test]
fn test_identical_input_gives_identical_bytes() {
    let pixels = generate_label_pixels(200, 120);
    let first = create_png_grayscale(&pixels, 200, 120).unwrap();
    let second = create_png_grayscale(&pixels, 200, 120).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_blank_label_compresses_well() {
    // 100x150 mm at 8 dpmm
    let pixels = vec![255u8; 800 * 1200];
    let png = create_png_grayscale(&pixels, 800, 1200).unwrap();

    println!("Blank 800x1200 label: {} bytes", png.len());
    assert!(png.len() < 10_000);
}
