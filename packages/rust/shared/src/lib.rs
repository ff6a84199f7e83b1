//! Shared types, error model, and build options for dashify.
//!
//! This crate is the foundation depended on by all other dashify crates.
//! It provides:
//! - [`DashifyError`]: the unified error type
//! - Domain types ([`OutputFile`], [`DocsetLayout`])
//! - Build options ([`BuildOptions`], [`TypeRule`], [`PlistValue`], option loading)

pub mod error;
pub mod options;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use error::{DashifyError, Result};
pub use options::{BuildOptions, DEFAULT_TYPE, PlistValue, TypeRule, load_options};
pub use types::{DocsetLayout, OutputFile};
