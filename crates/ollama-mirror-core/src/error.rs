//! Error types for the Ollama mirror.
//!
//! Only [`MirrorError::ManifestRootUnreadable`] stops a run. Everything else is
//! reported per manifest or per link and the pipeline moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the mirror library.
#[derive(Debug, Error)]
pub enum MirrorError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Cannot walk manifest directory {path}: {message}")]
    ManifestRootUnreadable { path: PathBuf, message: String },

    #[error("Failed to create symlink from {src} to {dest}: {reason}")]
    SymlinkFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    // Manifest errors
    #[error("Invalid digest: {0:?}")]
    InvalidDigest(String),

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        MirrorError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Whether this error ends the whole run rather than a single item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MirrorError::ManifestRootUnreadable { .. })
    }
}
