//! Scanner errors

use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors that abort a scan or reject a scanner configuration
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Root directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Failed to traverse {}: {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid language override '{0}': expected EXT=LANGUAGE")]
    InvalidLanguageOverride(String),
}

/// A single file that could not be read as text
///
/// Never aborts a scan; the file is left out of the results.
#[derive(Debug, Error)]
pub enum ReadFailure {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: String,
        #[source]
        source: FromUtf8Error,
    },
}

impl ReadFailure {
    /// Relative path of the file that failed
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Io { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}
