//! Error types for dashify.
//!
//! Library crates use [`DashifyError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all dashify operations.
#[derive(Debug, thiserror::Error)]
pub enum DashifyError {
    /// Malformed options file, missing field, or invalid type pattern.
    #[error("options error: {message}")]
    Options { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A second search index row with an existing `(name, type, path)`.
    #[error("duplicate search index entry (name={name:?}, type={entry_type}, path={path})")]
    IndexConstraint {
        name: Option<String>,
        entry_type: String,
        path: String,
    },

    /// Any other search index failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DashifyError>;

impl DashifyError {
    /// Create an options error from any displayable message.
    pub fn options(msg: impl Into<String>) -> Self {
        Self::Options {
            message: msg.into(),
        }
    }

    /// Create a storage error from any displayable message.
    pub fn storage(msg: impl ToString) -> Self {
        Self::Storage(msg.to_string())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
