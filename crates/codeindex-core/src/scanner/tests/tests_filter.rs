//! Tests for the ignore filter

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use crate::scanner::{IgnoreFilter, DEFAULT_IGNORE_PATTERNS};
use rstest::rstest;

#[rstest]
#[case(".git/config")]
#[case(".git/HEAD")]
#[case("vendor/lib/.git/objects/ab/cdef")]
#[case("node_modules/package.json")]
#[case("node_modules/x.json")]
#[case("web/node_modules/react/index.js")]
#[case("__pycache__/m.pyc")]
#[case("__pycache__/module.pyc")]
#[case("pkg/__pycache__/cache.bin")]
#[case("src/script.pyc")]
#[case(".venv/lib/site.py")]
#[case("venv/bin/activate")]
#[case(".idea/workspace.xml")]
#[case(".vscode/settings.json")]
#[case("docs/.DS_Store")]
#[case("image.png")]
#[case("assets/logo.svg")]
#[case("dist/release.tar.gz")]
#[case("lib/app.jar")]
#[case("notebooks/.ipynb_checkpoints/a.ipynb")]
fn test_default_patterns_ignore(#[case] path: &str) {
    let filter = IgnoreFilter::default();
    assert!(filter.should_ignore(path), "{path} should be ignored");
}

#[rstest]
#[case("src/main.py")]
#[case("README.md")]
#[case("config.json")]
#[case(".github/workflows/ci.yml")]
#[case(".gitignore")]
#[case("src/archive.tar")]
#[case("Image.PNG")]
fn test_default_patterns_keep(#[case] path: &str) {
    let filter = IgnoreFilter::default();
    assert!(!filter.should_ignore(path), "{path} should be kept");
}

#[test]
fn test_default_filter_has_default_patterns_in_order() {
    let filter = IgnoreFilter::default();
    assert_eq!(filter.patterns(), DEFAULT_IGNORE_PATTERNS);
    assert!(filter.patterns().iter().any(|p| p == "*.git/*"));
    assert!(filter.patterns().iter().any(|p| p == "*node_modules/*"));
    assert!(filter.patterns().iter().any(|p| p == "*.png"));
}

#[test]
fn test_custom_patterns_replace_defaults() {
    let filter = IgnoreFilter::new(["*.log", "temp/*"]).expect("valid patterns");

    assert!(filter.should_ignore("app.log"));
    assert!(filter.should_ignore("temp/cache.txt"));
    assert!(!filter.should_ignore("src/app.py"));
    assert!(!filter.should_ignore("image.png"));
    assert!(!filter.patterns().iter().any(|p| p == "*.git/*"));
}

#[test]
fn test_star_crosses_directory_separator() {
    let filter = IgnoreFilter::new(["*.log"]).expect("valid pattern");
    assert!(filter.should_ignore("logs/2024/app.log"));
}

#[test]
fn test_pattern_without_prefix_wildcard_only_matches_at_root() {
    let filter = IgnoreFilter::new(["temp/*"]).expect("valid pattern");
    assert!(filter.should_ignore("temp/a.txt"));
    assert!(!filter.should_ignore("src/temp/a.txt"));
}

#[test]
fn test_question_mark_matches_single_character() {
    let filter = IgnoreFilter::new(["file?.txt"]).expect("valid pattern");
    assert!(filter.should_ignore("file1.txt"));
    assert!(!filter.should_ignore("file10.txt"));
    assert!(!filter.should_ignore("file.txt"));
}

#[test]
fn test_character_class() {
    let filter = IgnoreFilter::new(["*.[oa]"]).expect("valid pattern");
    assert!(filter.should_ignore("build/main.o"));
    assert!(filter.should_ignore("build/libfoo.a"));
    assert!(!filter.should_ignore("build/main.c"));
}

#[test]
fn test_empty_pattern_set_ignores_nothing() {
    let filter = IgnoreFilter::new(Vec::<String>::new()).expect("empty set is valid");
    assert!(!filter.should_ignore(".git/HEAD"));
    assert!(!filter.should_ignore("image.png"));
}

#[test]
fn test_matching_pattern_reports_first_match() {
    let filter = IgnoreFilter::new(["*.json", "node_modules/*"]).expect("valid patterns");
    assert_eq!(
        filter.matching_pattern("node_modules/package.json"),
        Some("*.json")
    );
    assert_eq!(filter.matching_pattern("node_modules/index.js"), Some("node_modules/*"));
    assert_eq!(filter.matching_pattern("src/index.js"), None);
}

#[test]
fn test_pattern_order_does_not_change_result() {
    let forward = IgnoreFilter::new(["*.json", "node_modules/*"]).unwrap();
    let reverse = IgnoreFilter::new(["node_modules/*", "*.json"]).unwrap();

    for path in ["node_modules/package.json", "a.json", "src/a.rs"] {
        assert_eq!(forward.should_ignore(path), reverse.should_ignore(path));
    }
}

#[test]
fn test_default_patterns_all_compile() {
    assert!(IgnoreFilter::new(DEFAULT_IGNORE_PATTERNS.iter().copied()).is_ok());
    assert_eq!(
        IgnoreFilter::default().patterns().len(),
        DEFAULT_IGNORE_PATTERNS.len()
    );
}

#[rstest]
#[case(r"dir\*", r"dir\x", true)]
#[case(r"dir\*", "dir*", false)]
#[case(r"*\tmp", r"build\tmp", true)]
#[case(r"*\tmp", "build/tmp", false)]
fn test_backslash_is_literal(#[case] pattern: &str, #[case] path: &str, #[case] ignored: bool) {
    let filter = IgnoreFilter::new([pattern]).unwrap();
    assert_eq!(filter.should_ignore(path), ignored, "{pattern} vs {path}");
}

#[rstest]
#[case("[^a]x", "bx", false)]
#[case("[^a]x", "ax", true)]
#[case("[^a]x", "^x", true)]
#[case("[!a]x", "bx", true)]
#[case("[!a]x", "ax", false)]
#[case("[!^]x", "^x", false)]
#[case("[^]x", "^x", true)]
#[case("[a-c]x", "bx", true)]
#[case("[a-c]x", "dx", false)]
fn test_class_negation_uses_bang_only(
    #[case] pattern: &str,
    #[case] path: &str,
    #[case] ignored: bool,
) {
    let filter = IgnoreFilter::new([pattern]).unwrap();
    assert_eq!(filter.should_ignore(path), ignored, "{pattern} vs {path}");
}

#[rstest]
#[case("*.{py,js}", "a.py", false)]
#[case("*.{py,js}", "a.js", false)]
#[case("*.{py,js}", "a.{py,js}", true)]
#[case("*.{bak", "notes.{bak", true)]
#[case("*}", "a}", true)]
fn test_braces_are_literal(#[case] pattern: &str, #[case] path: &str, #[case] ignored: bool) {
    let filter = IgnoreFilter::new([pattern]).unwrap();
    assert_eq!(filter.should_ignore(path), ignored, "{pattern} vs {path}");
}

#[rstest]
#[case("[invalid", "[invalid", true)]
#[case("[invalid", "i", false)]
#[case("src/[", "src/[", true)]
#[case("*[!", "a[!", true)]
fn test_unclosed_class_matches_itself(
    #[case] pattern: &str,
    #[case] path: &str,
    #[case] ignored: bool,
) {
    let filter = IgnoreFilter::new(["*.rs", pattern]).unwrap();
    assert_eq!(filter.should_ignore(path), ignored, "{pattern} vs {path}");
}

#[test]
fn test_empty_class_never_matches() {
    let filter = IgnoreFilter::new(["[z-a]", "*.log"]).unwrap();

    for path in ["a", "z", "-", "[z-a]"] {
        assert!(!filter.should_ignore(path), "{path}");
    }
    assert!(filter.should_ignore("app.log"));
    assert_eq!(filter.patterns().len(), 2);
}
