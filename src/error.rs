//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docref-mcp operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading a compiled corpus fails.
///
/// `NotFound` and `Malformed` are deliberately distinct: "no corpus loaded" must
/// be reportable to the caller as something other than "no matches".
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// No corpus file exists at the expected path.
    #[error("no corpus found at {path} (run `docref compile` first)")]
    NotFound { path: PathBuf },

    /// The corpus file exists but could not be read.
    #[error("failed to read corpus at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus file exists but is not valid corpus JSON.
    #[error("malformed corpus at {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}
