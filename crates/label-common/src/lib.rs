//! Common types for the label render workspace.
//!
//! The HTTP service only talks to the markup parser and the rasterizer
//! through the traits in [`capability`], so either engine can be swapped
//! without touching the request pipeline.

pub mod capability;
pub mod document;
pub mod error;

pub use capability::{MarkupParser, Rasterizer, RenderOptions};
pub use document::*;
pub use error::{ParseError, ParseResult, RenderError, RenderResult};
