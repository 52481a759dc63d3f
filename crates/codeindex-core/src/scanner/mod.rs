//! Scanner module: File discovery, filtering and language detection
//!
//! Responsible for walking the repository, normalizing relative paths,
//! applying ignore patterns, detecting the language of each file and
//! reading its content into a [`FileRecord`].

mod error;
mod filter;
mod language;
mod normalize;
mod record;
mod run;
mod walker;

pub use error::{ReadFailure, ScanError};
pub use filter::{IgnoreFilter, DEFAULT_IGNORE_PATTERNS};
pub use language::{parse_language_override, LanguageTable, DEFAULT_LANGUAGES};
pub use normalize::normalize_path;
pub use record::{FailureKind, FileRecord, ScanFailure};
pub use run::{scan_repository, ScanReport, Scanner, ScannerConfig};
pub use walker::{TraversalPolicy, TreeWalker, WalkOutcome};

#[cfg(test)]
mod tests;
