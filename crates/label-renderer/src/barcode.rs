//! Code 128 (subset B) symbol generation.

use image::GrayImage;
use label_common::{Barcode128, RenderError, RenderResult};

use crate::canvas::Window;
use crate::font;

/// Bar/space widths in modules for symbol values 0..=105; each pattern
/// starts with a bar.
const PATTERNS: [&str; 106] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232",
];

const START_B: u32 = 104;
const STOP_PATTERN: &str = "2331112";

/// Symbol values for `data`, including start code and check digit.
pub fn encode_values(data: &str) -> RenderResult<Vec<u32>> {
    let mut values = Vec::with_capacity(data.len() + 2);
    values.push(START_B);

    for character in data.chars() {
        let code = character as u32;
        if !(32..=127).contains(&code) {
            return Err(RenderError::UnsupportedBarcodeData { character });
        }
        values.push(code - 32);
    }

    let checksum = values
        .iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { *v } else { i as u32 * v })
        .sum::<u32>()
        % 103;
    values.push(checksum);

    Ok(values)
}

/// Expand symbol values into a module sequence; `true` is a bar.
pub fn modules(values: &[u32]) -> Vec<bool> {
    let mut out = Vec::with_capacity(values.len() * 11 + 13);

    let patterns = values
        .iter()
        .map(|v| PATTERNS[*v as usize])
        .chain(std::iter::once(STOP_PATTERN));

    for pattern in patterns {
        for (i, width) in pattern.bytes().enumerate() {
            let bar = i % 2 == 0;
            for _ in 0..(width - b'0') {
                out.push(bar);
            }
        }
    }

    out
}

/// Laid out Code 128 symbol for one barcode field, upright.
#[derive(Debug, Clone)]
pub struct Symbol<'a> {
    data: &'a str,
    modules: Vec<bool>,
    module_width: u64,
    bars_height: u64,
    interpretation_above: bool,
    /// Extent of the interpretation line, when printed.
    text: Option<(u64, u64)>,
}

impl<'a> Symbol<'a> {
    pub fn new(barcode: &'a Barcode128) -> RenderResult<Self> {
        let modules = modules(&encode_values(&barcode.data)?);
        let module_width = barcode.module_width.max(1) as u64;
        let text = barcode.interpretation_line.then(|| {
            font::text_size(&barcode.data, 9 * module_width, 5 * module_width)
        });

        Ok(Self {
            data: &barcode.data,
            modules,
            module_width,
            bars_height: barcode.height.max(1) as u64,
            interpretation_above: barcode.interpretation_above,
            text,
        })
    }

    /// Interpretation line plus the gap separating it from the bars.
    fn text_block_height(&self) -> u64 {
        self.text
            .map(|(_, height)| height + self.module_width)
            .unwrap_or(0)
    }

    /// Upright width and height, including the interpretation line.
    pub fn size(&self) -> (u64, u64) {
        let bars_width = self.modules.len() as u64 * self.module_width;
        let text_width = self.text.map(|(width, _)| width).unwrap_or(0);
        (
            bars_width.max(text_width),
            self.bars_height + self.text_block_height(),
        )
    }

    /// Coverage mask for the part of the symbol inside `window`.
    pub fn mask(&self, window: Window) -> GrayImage {
        let mut mask = GrayImage::new(window.width, window.height);
        let mw = self.module_width;

        let bars_top = if self.interpretation_above {
            self.text_block_height()
        } else {
            0
        };
        let first = (window.x / mw) as usize;
        let last = ((window.x + window.width as u64).div_ceil(mw) as usize).min(self.modules.len());
        let visible = self.modules.iter().enumerate().take(last).skip(first);
        for (i, bar) in visible {
            if *bar {
                let x0 = i as u64 * mw;
                window.fill(&mut mask, x0, bars_top, x0 + mw, bars_top + self.bars_height, 255);
            }
        }

        if let Some((text_width, _)) = self.text {
            let (width, _) = self.size();
            let text_x = (width - text_width) / 2;
            let text_y = if self.interpretation_above {
                0
            } else {
                self.bars_height + mw
            };
            font::draw_text(&mut mask, window, self.data, (text_x, text_y), 9 * mw, 5 * mw);
        }

        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_common::{Orientation, Position};

    fn barcode(data: &str, interpretation_line: bool) -> Barcode128 {
        Barcode128 {
            position: Position::default(),
            orientation: Orientation::Normal,
            module_width: 2,
            height: 30,
            interpretation_line,
            interpretation_above: false,
            data: data.to_string(),
            reverse: false,
        }
    }

    #[test]
    fn test_checksum_for_known_value() {
        // "PJJ123C": start B 104, sum = 104 + 1*48 + 2*42 + 3*42 + 4*17 + 5*18 + 6*19 + 7*35 = 879
        let values = encode_values("PJJ123C").unwrap();
        assert_eq!(values.first(), Some(&104));
        assert_eq!(values.last(), Some(&(879 % 103)));
    }

    #[test]
    fn test_module_count() {
        let values = encode_values("AB").unwrap();
        // start + 2 data + checksum at 11 modules each, stop is 13
        assert_eq!(modules(&values).len(), 4 * 11 + 13);
    }

    #[test]
    fn test_every_pattern_is_eleven_modules() {
        for pattern in PATTERNS {
            let total: u32 = pattern.bytes().map(|b| (b - b'0') as u32).sum();
            assert_eq!(total, 11, "pattern {pattern}");
        }
    }

    #[test]
    fn test_rejects_non_ascii() {
        let err = encode_values("caf\u{e9}").unwrap_err();
        assert_eq!(err, RenderError::UnsupportedBarcodeData { character: '\u{e9}' });
    }

    fn full_mask(symbol: &Symbol) -> GrayImage {
        let (w, h) = symbol.size();
        symbol.mask(Window::full(w as u32, h as u32))
    }

    #[test]
    fn test_symbol_size() {
        let plain = barcode("AB", false);
        assert_eq!(Symbol::new(&plain).unwrap().size(), (57 * 2, 30));

        let with_text = barcode("AB", true);
        assert_eq!(Symbol::new(&with_text).unwrap().size(), (57 * 2, 30 + 2 + 18));
    }

    #[test]
    fn test_symbol_starts_and_ends_with_bar() {
        let field = barcode("1", false);
        let mask = full_mask(&Symbol::new(&field).unwrap());
        assert_ne!(mask.get_pixel(0, 0).0[0], 0);
        assert_ne!(mask.get_pixel(mask.width() - 1, 0).0[0], 0);
    }

    #[test]
    fn test_interpretation_line_above_moves_bars_down() {
        let mut field = barcode("AB", true);
        field.interpretation_above = true;
        let mask = full_mask(&Symbol::new(&field).unwrap());
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_ne!(mask.get_pixel(0, 20).0[0], 0);
    }

    #[test]
    fn test_huge_field_only_allocates_the_window() {
        let mut field = barcode("AB", true);
        field.module_width = u32::MAX;
        field.height = u32::MAX;
        let symbol = Symbol::new(&field).unwrap();
        assert!(symbol.size().0 > u32::MAX as u64);

        let mask = symbol.mask(Window::full(80, 80));
        assert_eq!(mask.dimensions(), (80, 80));
        // first module of the start pattern is a bar
        assert!(mask.pixels().all(|p| p.0[0] != 0));
    }
}
