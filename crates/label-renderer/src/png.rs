//! PNG encoding for label canvases.
//!
//! Labels are monochrome, so the canvas is written as 8-bit greyscale
//! (color type 0). The encoder uses fixed compression settings and no
//! ancillary chunks, which keeps the output byte-identical for identical
//! input.

use std::io::Write;

/// PNG file signature
const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Create a greyscale PNG from one byte per pixel.
///
/// # Arguments
/// - `pixels`: greyscale data, row-major, `width * height` bytes
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png_grayscale(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    if pixels.len() != width * height {
        return Err(format!(
            "pixel buffer holds {} bytes, expected {}x{}",
            pixels.len(),
            width,
            height
        ));
    }

    let mut png = Vec::new();

    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(0); // color type 0 = greyscale
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat(pixels, width, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate scanlines for the IDAT chunk.
fn deflate_idat(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    // Each row is: filter_byte + width sample bytes
    let mut uncompressed = Vec::with_capacity(height * (1 + width));
    for row in pixels.chunks_exact(width.max(1)).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    // Label art is mostly long runs of one colour; default level pays off
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_and_ihdr() {
        let pixels = [0u8, 255, 255, 0];
        let png = create_png_grayscale(&pixels, 2, 2).unwrap();

        assert_eq!(&png[0..8], &PNG_SIGNATURE);
        // IHDR length + type
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..20], &2u32.to_be_bytes());
        assert_eq!(&png[20..24], &2u32.to_be_bytes());
        assert_eq!(png[24], 8);
        assert_eq!(png[25], 0);
    }

    #[test]
    fn test_ends_with_iend() {
        let png = create_png_grayscale(&[255u8; 9], 3, 3).unwrap();
        let tail = &png[png.len() - 12..];
        assert_eq!(&tail[0..4], &0u32.to_be_bytes());
        assert_eq!(&tail[4..8], b"IEND");
        assert_eq!(&tail[8..12], &crc32fast::hash(b"IEND").to_be_bytes());
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = create_png_grayscale(&[0u8; 5], 2, 2).unwrap_err();
        assert!(err.contains("expected 2x2"));
    }
}
