//! `^FH` escape decoding for field data.

use label_common::{ParseError, ParseResult};

/// Replace `<indicator><hex><hex>` sequences with the byte they encode.
///
/// The resulting byte stream is decoded as UTF-8, lossily, so multi-byte
/// characters can be written as consecutive escapes.
pub fn decode_field_hex(data: &str, indicator: char) -> ParseResult<String> {
    let mut bytes = Vec::with_capacity(data.len());
    let mut chars = data.chars();

    while let Some(c) = chars.next() {
        if c != indicator {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let hi = chars.next();
        let lo = chars.next();
        let digits = match (hi, lo) {
            (Some(h), Some(l)) => (h.to_digit(16), l.to_digit(16)),
            _ => (None, None),
        };

        match digits {
            (Some(h), Some(l)) => bytes.push((h * 16 + l) as u8),
            _ => {
                let sequence: String = std::iter::once(c).chain(hi).chain(lo).collect();
                return Err(ParseError::InvalidHexEscape { sequence });
            }
        }
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
