//! Shared test utilities for the label render workspace.
//!
//! This crate provides:
//! - Fixed ZPL documents covering the common request scenarios
//! - Generators for labels with predictable, distinct content
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, text_label};
//! ```

pub mod fixtures;
pub mod generators;

pub use generators::*;
