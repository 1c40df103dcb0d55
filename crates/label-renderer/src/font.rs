//! Built-in bitmap face for text fields.
//!
//! One 5x7 face serves every font designator; glyphs are scaled to the
//! requested character cell. A cell is 6x8 glyph pixels: the glyph plus one
//! column of spacing and one row below the baseline.

use image::GrayImage;

use crate::canvas::Window;

const CELL_COLS: u64 = 6;
const CELL_ROWS: u64 = 8;
const GLYPH_ROWS: u64 = 7;

/// Column-major glyphs for ASCII 0x20..=0x7E; bit 0 is the top row.
const GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

/// Glyph used for characters the face does not cover.
const FALLBACK: char = '?';

fn glyph(c: char) -> &'static [u8; 5] {
    let code = c as u32;
    let index = if (0x20..=0x7E).contains(&code) {
        code - 0x20
    } else {
        FALLBACK as u32 - 0x20
    };
    &GLYPHS[index as usize]
}

/// Start of glyph pixel `i` out of `n` spread over `size` dots.
fn scaled(i: u64, n: u64, size: u64) -> u64 {
    i.saturating_mul(size) / n
}

/// Upright extent of `text` with `char_width` x `char_height` cells.
pub fn text_size(text: &str, char_height: u64, char_width: u64) -> (u64, u64) {
    let count = text.chars().count().max(1) as u64;
    (char_width.max(1).saturating_mul(count), char_height.max(1))
}

/// Draw `text` with its top-left cell corner at `origin`, both in element
/// coordinates, onto a mask backing `window`. Only characters overlapping
/// the window are visited.
pub fn draw_text(
    mask: &mut GrayImage,
    window: Window,
    text: &str,
    origin: (u64, u64),
    char_height: u64,
    char_width: u64,
) {
    let char_height = char_height.max(1);
    let char_width = char_width.max(1);
    let (ox, oy) = origin;

    let first = window.x.saturating_sub(ox) / char_width;
    let last = (window.x + window.width as u64)
        .saturating_sub(ox)
        .div_ceil(char_width);
    let visible = last.saturating_sub(first);
    if visible == 0 {
        return;
    }

    let characters = text
        .chars()
        .enumerate()
        .skip(first as usize)
        .take(visible as usize);

    for (i, c) in characters {
        let cell_x = ox + i as u64 * char_width;
        let cell_right = cell_x + char_width;

        for (col, bits) in glyph(c).iter().enumerate() {
            let col = col as u64;
            let x0 = cell_x + scaled(col, CELL_COLS, char_width);
            let x1 = (cell_x + scaled(col + 1, CELL_COLS, char_width))
                .max(x0 + 1)
                .min(cell_right);

            for row in 0..GLYPH_ROWS {
                if bits & (1 << row) == 0 {
                    continue;
                }
                let y0 = oy + scaled(row, CELL_ROWS, char_height);
                let y1 = (oy + scaled(row + 1, CELL_ROWS, char_height))
                    .max(y0 + 1)
                    .min(oy + char_height);
                window.fill(mask, x0, y0, x1, y1, 255);
            }
        }
    }
}

/// Render the part of a horizontal text run inside `window` into a
/// coverage mask.
pub fn text_mask(text: &str, char_height: u64, char_width: u64, window: Window) -> GrayImage {
    let mut mask = GrayImage::new(window.width, window.height);
    draw_text(&mut mask, window, text, (0, 0), char_height, char_width);
    mask
}

/// Distance from the top of a cell to the baseline, in dots.
pub fn baseline_offset(char_height: u64) -> u64 {
    scaled(GLYPH_ROWS, CELL_ROWS, char_height.max(1))
}
