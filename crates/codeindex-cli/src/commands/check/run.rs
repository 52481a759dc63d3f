//! Check command implementation

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use codeindex_core::scanner::{normalize_path, Scanner};

use crate::commands::FilterArgs;

/// How one path would be handled by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCheck {
    pub normalized: String,
    pub ignored_by: Option<String>,
    pub language: Option<String>,
}

/// Normalize a path and evaluate it against the scanner's filter and
/// language table
#[must_use]
pub fn check_path(scanner: &Scanner, path: &str) -> PathCheck {
    let normalized = normalize_path(path);
    let ignored_by = scanner
        .ignore_filter()
        .matching_pattern(&normalized)
        .map(str::to_string);
    let language = scanner.language_of(&normalized).map(str::to_string);

    PathCheck {
        normalized,
        ignored_by,
        language,
    }
}

/// Run the check command
///
/// # Errors
/// Returns an error if the filter configuration is invalid or stdout cannot
/// be written.
pub fn run(paths: &[String], filters: &FilterArgs) -> Result<()> {
    let config = filters.to_config(PathBuf::from("."))?;
    let scanner = Scanner::from_config(config).context("Invalid scanner configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in paths {
        let check = check_path(&scanner, path);
        writeln!(
            out,
            "{}\t{}\t{}",
            check.normalized,
            check
                .ignored_by
                .map_or_else(|| "kept".to_string(), |p| format!("ignored ({p})")),
            check.language.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}
