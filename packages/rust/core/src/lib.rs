//! Core pipeline orchestration for dashify.
//!
//! This crate ties together tree walking, page rendering, and bundle
//! assembly into the end-to-end `build_docset` workflow.

pub mod assembler;
pub mod pipeline;
pub mod walker;

pub use pipeline::{BuildReport, ProgressReporter, SilentProgress, build_docset};
