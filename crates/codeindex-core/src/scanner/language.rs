//! Language detection utilities

use std::collections::HashMap;
use std::path::Path;

use super::ScanError;

/// Built-in extension table, keyed by lowercase extension with its dot
pub const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    (".py", "python"),
    (".js", "javascript"),
    (".ts", "typescript"),
    (".jsx", "javascript"),
    (".tsx", "typescript"),
    (".java", "java"),
    (".c", "c"),
    (".cpp", "cpp"),
    (".h", "c"),
    (".hpp", "cpp"),
    (".cs", "csharp"),
    (".go", "go"),
    (".rb", "ruby"),
    (".php", "php"),
    (".swift", "swift"),
    (".kt", "kotlin"),
    (".rs", "rust"),
    (".lua", "lua"),
    (".sh", "bash"),
    (".html", "html"),
    (".css", "css"),
    (".scss", "scss"),
    (".sql", "sql"),
    (".md", "markdown"),
    (".json", "json"),
    (".xml", "xml"),
    (".yaml", "yaml"),
    (".yml", "yaml"),
    (".toml", "toml"),
];

/// Mapping from file extension to language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    by_extension: HashMap<String, String>,
}

impl LanguageTable {
    /// An empty table that classifies nothing
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_extension: HashMap::new(),
        }
    }

    /// Add or replace the language for an extension
    ///
    /// Accepts `"py"` or `".py"`, in any case.
    #[must_use]
    pub fn with_override(mut self, extension: &str, language: impl Into<String>) -> Self {
        self.by_extension
            .insert(extension_key(extension), language.into());
        self
    }

    /// Detect language from an extension, with or without the dot
    #[must_use]
    pub fn for_extension(&self, extension: &str) -> Option<&str> {
        self.by_extension
            .get(&extension_key(extension))
            .map(String::as_str)
    }

    /// Detect language from a file path
    ///
    /// Files without an extension, including dot-files such as `.bashrc`,
    /// have no language.
    #[must_use]
    pub fn language_of(&self, path: &str) -> Option<&str> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .and_then(|ext| self.for_extension(ext))
    }

    /// Entries sorted by extension
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .by_extension
            .iter()
            .map(|(ext, lang)| (ext.as_str(), lang.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Number of known extensions
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self {
            by_extension: DEFAULT_LANGUAGES
                .iter()
                .map(|(ext, lang)| ((*ext).to_string(), (*lang).to_string()))
                .collect(),
        }
    }
}

/// Parse an `EXT=LANGUAGE` override such as `vue=vue` or `.h=cpp`
///
/// # Errors
/// Returns [`ScanError::InvalidLanguageOverride`] when either side is empty
/// or the `=` is missing.
pub fn parse_language_override(input: &str) -> Result<(String, String), ScanError> {
    let invalid = || ScanError::InvalidLanguageOverride(input.to_string());
    let (ext, lang) = input.split_once('=').ok_or_else(invalid)?;
    let (ext, lang) = (ext.trim(), lang.trim());

    if ext.trim_start_matches('.').is_empty() || lang.is_empty() {
        return Err(invalid());
    }

    Ok((extension_key(ext), lang.to_string()))
}

fn extension_key(extension: &str) -> String {
    let lower = extension.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
