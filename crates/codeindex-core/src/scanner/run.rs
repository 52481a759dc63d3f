//! Repository scanner: walk, normalize, filter, classify and read

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    normalize_path, FileRecord, IgnoreFilter, LanguageTable, ReadFailure, ScanError, ScanFailure,
    TraversalPolicy, TreeWalker, DEFAULT_IGNORE_PATTERNS,
};

/// Settings for a [`Scanner`]
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub root: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub languages: LanguageTable,
    pub traversal_policy: TraversalPolicy,
    pub respect_gitignore: bool,
    pub git_info: bool,
}

impl ScannerConfig {
    /// Configuration with the default ignore patterns and language table
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            languages: LanguageTable::default(),
            traversal_policy: TraversalPolicy::default(),
            respect_gitignore: false,
            git_info: false,
        }
    }

    /// Replace the ignore patterns
    #[must_use]
    pub fn with_ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Append patterns after the current ones
    #[must_use]
    pub fn with_extra_ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set the language table
    #[must_use]
    pub fn with_language_table(mut self, languages: LanguageTable) -> Self {
        self.languages = languages;
        self
    }

    /// Set how unreadable subtrees are handled
    #[must_use]
    pub fn with_traversal_policy(mut self, policy: TraversalPolicy) -> Self {
        self.traversal_policy = policy;
        self
    }

    /// Honor `.gitignore` files while walking
    #[must_use]
    pub fn respect_gitignore(mut self, enabled: bool) -> Self {
        self.respect_gitignore = enabled;
        self
    }

    /// Record commit and branch of the enclosing git repository
    #[must_use]
    pub fn with_git_info(mut self, enabled: bool) -> Self {
        self.git_info = enabled;
        self
    }
}

/// Result of one scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub root: String,
    pub scanned_at: DateTime<Utc>,
    pub commit_sha: Option<String>,
    pub branch: Option<String>,
    /// Records sorted by path
    pub records: Vec<FileRecord>,
    /// Files and subtrees left out, in discovery order
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    fn new(root: &Path) -> Self {
        Self {
            root: root.display().to_string(),
            scanned_at: Utc::now(),
            commit_sha: None,
            branch: None,
            records: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Try to populate git info from the repository containing the root
    #[must_use]
    pub fn with_git_info(mut self) -> Self {
        (self.commit_sha, self.branch) = git_head(&self.root);
        self
    }

    /// Record count per language, `"unknown"` for unclassified files
    #[must_use]
    pub fn language_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            let language = record.language.as_deref().unwrap_or("unknown");
            *counts.entry(language.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Sum of record sizes
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.records.iter().map(|r| r.size).sum()
    }

    /// Consume the report, keeping only the records
    #[must_use]
    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }
}

/// Scans a repository into [`FileRecord`]s
#[derive(Debug, Clone)]
pub struct Scanner {
    walker: TreeWalker,
    filter: IgnoreFilter,
    languages: LanguageTable,
    traversal_policy: TraversalPolicy,
    git_info: bool,
}

impl Scanner {
    /// Create a scanner with the default ignore patterns and languages
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            walker: TreeWalker::new(root),
            filter: IgnoreFilter::default(),
            languages: LanguageTable::default(),
            traversal_policy: TraversalPolicy::default(),
            git_info: false,
        }
    }

    /// Create a scanner from an explicit configuration
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidPattern`] if an ignore pattern does not
    /// compile.
    pub fn from_config(config: ScannerConfig) -> Result<Self, ScanError> {
        Ok(Self {
            walker: TreeWalker::new(config.root).respect_gitignore(config.respect_gitignore),
            filter: IgnoreFilter::new(config.ignore_patterns)?,
            languages: config.languages,
            traversal_policy: config.traversal_policy,
            git_info: config.git_info,
        })
    }

    /// Get the root directory being scanned
    #[must_use]
    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// The compiled ignore patterns
    #[must_use]
    pub fn ignore_filter(&self) -> &IgnoreFilter {
        &self.filter
    }

    /// The language table used for classification
    #[must_use]
    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Whether a normalized relative path is excluded
    #[must_use]
    pub fn should_ignore(&self, path: &str) -> bool {
        self.filter.should_ignore(path)
    }

    /// Language tag for a path, from its extension
    #[must_use]
    pub fn language_of(&self, path: &str) -> Option<&str> {
        self.languages.language_of(path)
    }

    /// Read one file, relative to the root, into a record
    ///
    /// # Errors
    /// Returns a [`ReadFailure`] if the file cannot be read or is not UTF-8.
    pub fn parse_file(&self, path: &str) -> Result<FileRecord, ReadFailure> {
        let abs_path = self.root().join(path);
        let bytes = std::fs::read(&abs_path).map_err(|source| ReadFailure::Io {
            path: path.to_string(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|source| ReadFailure::Decode {
            path: path.to_string(),
            source,
        })?;

        let language = self.language_of(path).map(str::to_string);
        Ok(FileRecord::new(path, content, language))
    }

    /// Walk the root and return the normalized, non-ignored paths, sorted
    ///
    /// # Errors
    /// Returns an error if the root cannot be walked.
    pub fn relevant_paths(&self) -> Result<Vec<String>, ScanError> {
        let (paths, _) = self.collect_paths()?;
        Ok(paths)
    }

    /// Scan the repository
    ///
    /// # Errors
    /// Returns an error if the root is missing or not a directory, or if a
    /// subtree cannot be read under [`TraversalPolicy::Abort`]. Unreadable
    /// files never fail the scan; they are listed in
    /// [`ScanReport::failures`].
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        info!("Scanning repository: {}", self.root().display());

        let mut report = ScanReport::new(self.root());
        if self.git_info {
            report = report.with_git_info();
        }

        let (paths, skipped) = self.collect_paths()?;
        report.failures = skipped;

        for path in paths {
            match self.parse_file(&path) {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!("Skipping file {}: {}", path, e);
                    report.failures.push(ScanFailure::from(&e));
                }
            }
        }

        info!(
            "✓ Scan completed: {} files, {} bytes, {} failures",
            report.records.len(),
            report.total_bytes(),
            report.failures.len()
        );
        Ok(report)
    }

    fn collect_paths(&self) -> Result<(Vec<String>, Vec<ScanFailure>), ScanError> {
        let outcome = self.walker.walk(self.traversal_policy)?;
        let walked = outcome.paths.len();

        let mut paths: Vec<String> = outcome
            .paths
            .iter()
            .map(|p| normalize_path(p))
            .filter(|p| match self.filter.matching_pattern(p) {
                Some(pattern) => {
                    debug!("Ignoring {} (matched {})", p, pattern);
                    false
                }
                None => true,
            })
            .collect();
        paths.sort_unstable();
        paths.dedup();

        debug!("{} of {} walked files kept", paths.len(), walked);
        Ok((paths, outcome.skipped))
    }
}

/// Commit id and branch name of HEAD in the repository containing `root`
pub(crate) fn git_head(root: &str) -> (Option<String>, Option<String>) {
    let Ok(repo) = git2::Repository::discover(root) else {
        return (None, None);
    };
    let Ok(head) = repo.head() else {
        return (None, None);
    };

    (
        head.target().map(|oid| oid.to_string()),
        head.shorthand().map(str::to_string),
    )
}

/// Scan `root` and return its records, using the default ignore patterns
/// when `ignore_patterns` is `None`
///
/// `Some(vec![])` is an explicit empty list and ignores nothing.
///
/// # Errors
/// Returns an error if a pattern is invalid or the root cannot be walked.
pub fn scan_repository(
    root: impl Into<PathBuf>,
    ignore_patterns: Option<Vec<String>>,
) -> Result<Vec<FileRecord>, ScanError> {
    let mut config = ScannerConfig::new(root);
    if let Some(patterns) = ignore_patterns {
        config = config.with_ignore_patterns(patterns);
    }
    Ok(Scanner::from_config(config)?.scan()?.into_records())
}
