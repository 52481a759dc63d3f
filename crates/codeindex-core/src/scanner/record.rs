//! Scan output records

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{ReadFailure, ScanError};

/// One indexed file: normalized relative path, text content and language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub content: String,
    pub language: Option<String>,
    /// Length of `content` in UTF-8 bytes. This is larger than the
    /// character count when the content holds non-ASCII text.
    pub size: usize,
}

impl FileRecord {
    /// Build a record, deriving `size` from the content
    #[must_use]
    pub fn new(path: impl Into<String>, content: String, language: Option<String>) -> Self {
        let size = content.len();
        Self {
            path: path.into(),
            content,
            language,
            size,
        }
    }

    /// SHA-256 of the content as a lowercase hex string
    #[must_use]
    pub fn content_hash(&self) -> String {
        let digest = Sha256::digest(self.content.as_bytes());
        format!("{digest:x}")
    }
}

/// Category of a non-fatal scan failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// File could not be opened or read
    Read,
    /// File is not valid UTF-8
    Decode,
    /// Directory entry could not be enumerated
    Traversal,
}

/// A file or subtree left out of a scan, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub path: String,
    pub kind: FailureKind,
    pub message: String,
}

impl From<&ReadFailure> for ScanFailure {
    fn from(failure: &ReadFailure) -> Self {
        let kind = match failure {
            ReadFailure::Io { .. } => FailureKind::Read,
            ReadFailure::Decode { .. } => FailureKind::Decode,
        };
        Self {
            path: failure.path().to_string(),
            kind,
            message: failure.to_string(),
        }
    }
}

impl ScanFailure {
    pub(crate) fn traversal(path: impl Into<String>, error: &ScanError) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::Traversal,
            message: error.to_string(),
        }
    }
}
