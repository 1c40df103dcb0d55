//! Error types shared by the markup parser and the rasterizer.

use thiserror::Error;

/// Result type alias using ParseError.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

/// Failures raised while turning raw markup into label documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    // === Label structure ===
    #[error("^XZ at offset {offset} has no matching ^XA")]
    UnexpectedLabelEnd { offset: usize },

    #[error("^XA at offset {offset} opens a label inside another label")]
    NestedLabelStart { offset: usize },

    #[error("label opened at offset {offset} is never closed with ^XZ")]
    UnterminatedLabel { offset: usize },

    #[error("field data at offset {offset} is not terminated with ^FS")]
    UnterminatedField { offset: usize },

    // === Arguments ===
    #[error("invalid value '{value}' for ^{command}")]
    InvalidArgument { command: String, value: String },

    #[error("invalid hex escape '{sequence}' in field data")]
    InvalidHexEscape { sequence: String },

    // === Infrastructure ===
    #[error("parser worker failed: {0}")]
    Internal(String),
}

impl ParseError {
    /// Shorthand for an argument that could not be interpreted.
    pub fn invalid_argument(command: &str, value: impl Into<String>) -> Self {
        ParseError::InvalidArgument {
            command: command.to_string(),
            value: value.into(),
        }
    }
}

/// Failures raised while drawing a label document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("label geometry must be positive (width {width_mm} mm, height {height_mm} mm, {dpmm} dpmm)")]
    InvalidGeometry {
        width_mm: f64,
        height_mm: f64,
        dpmm: i64,
    },

    #[error("canvas of {width}x{height} dots exceeds the {max} dot limit per side")]
    CanvasTooLarge { width: u64, height: u64, max: u32 },

    #[error("character {character:?} cannot be encoded in Code 128")]
    UnsupportedBarcodeData { character: char },

    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    #[error("renderer worker failed: {0}")]
    Internal(String),
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Encoding(err.to_string())
    }
}
