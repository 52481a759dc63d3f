//! codeindex-core: Repository scanning for code indexing pipelines
//!
//! Walks a repository, drops files matching ignore patterns, tags each
//! remaining file with a language derived from its extension and reads its
//! content as UTF-8. The resulting [`FileRecord`]s are the input of the
//! downstream embedding and search indexers.
//!
//! # Pipeline
//!
//! - **walker** - enumerate every file under the root
//! - **normalize** - forward slashes, no leading `./`
//! - **filter** - shell-glob ignore patterns on the whole relative path
//! - **language** + **record** - classify and read

pub mod scanner;

// Re-export commonly used types
pub use scanner::{
    normalize_path, scan_repository, FileRecord, IgnoreFilter, LanguageTable, ReadFailure,
    ScanError, ScanReport, Scanner, ScannerConfig,
};
