//! Tree walker: Enumerates every file under a root directory

use std::fs::FileType;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{ScanError, ScanFailure};

/// What to do when a directory or entry below the root cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalPolicy {
    /// Fail the whole walk with [`ScanError::Traversal`]
    #[default]
    Abort,
    /// Log, record a [`ScanFailure`] and keep walking
    Skip,
}

/// Files found by a walk, relative to the root in host path form
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub paths: Vec<String>,
    pub skipped: Vec<ScanFailure>,
}

/// Recursive, depth-first directory walker
///
/// Directory symlinks are not descended into. A symlink to a file counts as
/// a file.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    respect_gitignore: bool,
}

impl TreeWalker {
    /// Create a walker for the given root directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_gitignore: false,
        }
    }

    /// Skip files excluded by `.gitignore`, `.git/info/exclude` and the
    /// global excludes file
    #[must_use]
    pub fn respect_gitignore(mut self, enabled: bool) -> Self {
        self.respect_gitignore = enabled;
        self
    }

    /// Get the root directory being walked
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and collect every file path
    ///
    /// # Errors
    /// Returns an error if the root is missing or not a directory, or if a
    /// subtree cannot be read under [`TraversalPolicy::Abort`].
    pub fn walk(&self, policy: TraversalPolicy) -> Result<WalkOutcome, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::RootNotDirectory(self.root.clone()));
        }

        if self.respect_gitignore {
            debug!("Walking {} with gitignore rules", self.root.display());
            self.walk_gitignore(policy)
        } else {
            self.walk_all(policy)
        }
    }

    fn walk_all(&self, policy: TraversalPolicy) -> Result<WalkOutcome, ScanError> {
        let mut outcome = WalkOutcome::default();

        for entry in WalkDir::new(&self.root).follow_links(false).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if is_file(entry.file_type(), entry.path()) {
                        outcome.paths.push(self.relative(entry.path()));
                    }
                }
                Err(err) => {
                    let path = err.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                    self.handle_error(&mut outcome, policy, path, Box::new(err))?;
                }
            }
        }

        Ok(outcome)
    }

    fn walk_gitignore(&self, policy: TraversalPolicy) -> Result<WalkOutcome, ScanError> {
        let mut outcome = WalkOutcome::default();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .git_global(true)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry
                        .file_type()
                        .is_some_and(|ft| is_file(ft, entry.path()))
                    {
                        outcome.paths.push(self.relative(entry.path()));
                    }
                }
                Err(err) => {
                    let path = ignore_error_path(&err)
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    self.handle_error(&mut outcome, policy, path, Box::new(err))?;
                }
            }
        }

        Ok(outcome)
    }

    fn handle_error(
        &self,
        outcome: &mut WalkOutcome,
        policy: TraversalPolicy,
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Result<(), ScanError> {
        let relative = self.relative(&path);
        let error = ScanError::Traversal { path, source };

        match policy {
            TraversalPolicy::Abort => Err(error),
            TraversalPolicy::Skip => {
                warn!("Skipping unreadable entry: {}", error);
                outcome.skipped.push(ScanFailure::traversal(relative, &error));
                Ok(())
            }
        }
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

fn is_file(file_type: FileType, path: &Path) -> bool {
    file_type.is_file() || (file_type.is_symlink() && !path.is_dir())
}

fn ignore_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            ignore_error_path(err)
        }
        _ => None,
    }
}
