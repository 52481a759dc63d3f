//! Command types shared between main and library

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use codeindex_core::scanner::{
    parse_language_override, LanguageTable, ScannerConfig, TraversalPolicy,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a repository and print its file records
    Scan(ScanArgs),

    /// Show how paths would be normalized, filtered and classified
    Check {
        /// Relative paths to check
        #[arg(required = true)]
        paths: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the extension-to-language table
    Languages {
        /// Override or add a language mapping (EXT=LANGUAGE)
        #[arg(long = "language", value_name = "EXT=LANGUAGE")]
        overrides: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Path to the repository to scan
    pub path: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Also honor .gitignore files
    #[arg(long)]
    pub gitignore: bool,

    /// Record commit and branch of the enclosing git repository
    #[arg(long)]
    pub git_info: bool,

    /// Skip unreadable directories instead of failing the scan
    #[arg(long)]
    pub skip_unreadable_dirs: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl ScanArgs {
    /// Build the scanner configuration for these arguments
    ///
    /// # Errors
    /// Returns an error if a language override is malformed.
    pub fn to_config(&self) -> Result<ScannerConfig> {
        let policy = if self.skip_unreadable_dirs {
            TraversalPolicy::Skip
        } else {
            TraversalPolicy::Abort
        };

        Ok(self
            .filters
            .to_config(self.path.clone())?
            .respect_gitignore(self.gitignore)
            .with_git_info(self.git_info)
            .with_traversal_policy(policy))
    }
}

/// Ignore and language options shared by `scan` and `check`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Ignore pattern replacing the built-in set (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Ignore pattern added to the active set (repeatable)
    #[arg(long = "extra-ignore", value_name = "PATTERN")]
    pub extra_ignore: Vec<String>,

    /// Override or add a language mapping (EXT=LANGUAGE, repeatable)
    #[arg(long = "language", value_name = "EXT=LANGUAGE")]
    pub languages: Vec<String>,
}

impl FilterArgs {
    /// Build a scanner configuration rooted at `root`
    ///
    /// # Errors
    /// Returns an error if a language override is malformed.
    pub fn to_config(&self, root: PathBuf) -> Result<ScannerConfig> {
        let mut config = ScannerConfig::new(root);
        if !self.ignore.is_empty() {
            config = config.with_ignore_patterns(self.ignore.iter().cloned());
        }

        Ok(config
            .with_extra_ignore_patterns(self.extra_ignore.iter().cloned())
            .with_language_table(language_table(&self.languages)?))
    }
}

/// Default language table with `EXT=LANGUAGE` overrides applied in order
///
/// # Errors
/// Returns an error if an override is malformed.
pub fn language_table(overrides: &[String]) -> Result<LanguageTable> {
    overrides
        .iter()
        .try_fold(LanguageTable::default(), |table, input| {
            let (ext, lang) = parse_language_override(input)?;
            Ok(table.with_override(&ext, lang))
        })
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full report as one JSON document
    Json,
    /// One record per line
    Jsonl,
    /// Per-language counts
    Summary,
}
