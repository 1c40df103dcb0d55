//! Collaborator contracts consumed by the render service.

use serde::Serialize;

use crate::document::LabelDocument;
use crate::error::{ParseResult, RenderResult};

/// Converts raw markup bytes into an ordered list of labels.
///
/// An empty list is a valid result: the input was well formed but did not
/// describe any label.
pub trait MarkupParser: Send + Sync {
    fn parse(&self, markup: &[u8]) -> ParseResult<Vec<LabelDocument>>;
}

/// Draws one label and returns the encoded PNG bytes.
pub trait Rasterizer: Send + Sync {
    fn render_png(&self, label: &LabelDocument, options: &RenderOptions) -> RenderResult<Vec<u8>>;
}

/// Output geometry for a single render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderOptions {
    pub label_width_mm: f64,
    pub label_height_mm: f64,
    pub dpmm: i64,
}

impl RenderOptions {
    /// Build options from validated request geometry. Width and height are
    /// only widened; no range check happens here.
    pub fn from_geometry(width_mm: i64, height_mm: i64, dpmm: i64) -> Self {
        Self {
            label_width_mm: width_mm as f64,
            label_height_mm: height_mm as f64,
            dpmm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_geometry_widens_without_clamping() {
        let options = RenderOptions::from_geometry(-4, 0, 8);
        assert_eq!(options.label_width_mm, -4.0);
        assert_eq!(options.label_height_mm, 0.0);
        assert_eq!(options.dpmm, 8);
    }
}
