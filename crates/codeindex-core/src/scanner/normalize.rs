//! Path normalization

use std::path::MAIN_SEPARATOR;

/// Normalize a root-relative path
///
/// Host separators become `/` and any leading `./` is stripped, so
/// `"./src/main.rs"` and `"src/main.rs"` compare equal. Never fails and is
/// idempotent.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut normalized = if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    };

    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }

    normalized
}
