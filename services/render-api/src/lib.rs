//! Label Render API
//!
//! HTTP front end turning ZPL label markup into PNG images. Each render
//! request runs through a fixed pipeline:
//!
//! 1. Validate the geometry path segments
//! 2. Read the markup body
//! 3. Parse it into label documents
//! 4. Rasterize the first label
//! 5. Answer with the PNG
//!
//! Every failure is mapped to a status code and a JSON error body by
//! [`error::ApiError`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod server;
pub mod state;
