//! ZPL generators for tests that need many distinct inputs.

/// A label with a single text field at a fixed origin.
///
/// # Example
///
/// ```
/// use test_utils::text_label;
///
/// let zpl = text_label("ABC", 30);
/// assert!(zpl.starts_with("^XA"));
/// assert!(zpl.contains("^FDABC^FS"));
/// ```
pub fn text_label(text: &str, height: u32) -> String {
    format!("^XA^FO10,10^A0N,{height},{height}^FD{text}^FS^XZ")
}

/// A label with a solid box whose size depends on `seed`, so two
/// different seeds always produce visibly different images.
pub fn box_label(seed: u32) -> String {
    let side = 4 + (seed % 40) * 2;
    format!("^XA^FO{x},4^GB{side},{side},{side}^FS^XZ", x = 2 + seed % 7)
}

/// `count` labels concatenated; label `i` prints the text `label-i`.
pub fn multi_label(count: usize) -> String {
    (0..count)
        .map(|i| format!("^XA^FO10,10^FDlabel-{i}^FS^XZ\n"))
        .collect()
}
