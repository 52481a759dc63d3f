//! Integration tests for scanning real directory trees
//!
//! Builds throwaway repositories in temp dirs and checks the end-to-end
//! output of the public scanning API.

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use codeindex_core::scanner::{
    normalize_path, scan_repository, FileRecord, ScanReport, Scanner, ScannerConfig,
    TraversalPolicy, TreeWalker,
};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write file");
}

// ============================================================================
// Walk
// ============================================================================

#[test]
fn test_walk_is_complete_regardless_of_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "file1.py", "");
    write(temp_dir.path(), "file2.js", "");
    write(temp_dir.path(), "subdir/file3.py", "");
    write(temp_dir.path(), "subdir/nested/file4.txt", "");

    let outcome = TreeWalker::new(temp_dir.path())
        .walk(TraversalPolicy::Abort)
        .expect("walk should succeed");
    let walked: BTreeSet<String> = outcome.paths.iter().map(|p| normalize_path(p)).collect();

    let expected: BTreeSet<String> = [
        "file1.py",
        "file2.js",
        "subdir/file3.py",
        "subdir/nested/file4.txt",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(walked, expected);
}

// ============================================================================
// Scan
// ============================================================================

#[test]
fn test_scan_repository_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write(root, "src/main.py", "def main():\n    print('Hello world')");
    write(root, "src/utils.js", "function helper() { return true; }");
    write(root, "README.md", "# Test Repository");
    write(root, "node_modules/ignored.js", "// This should be ignored");
    write(root, "web/node_modules/lib/index.js", "// nested dependency");
    write(root, "pkg/__pycache__/mod.cpython-312.pyc", "");
    write(root, ".venv/lib/site.py", "");
    write(root, ".idea/workspace.xml", "<project/>");

    let records = scan_repository(root, None).expect("scan should succeed");

    let expected = vec![
        FileRecord::new("README.md", "# Test Repository".into(), Some("markdown".into())),
        FileRecord::new(
            "src/main.py",
            "def main():\n    print('Hello world')".into(),
            Some("python".into()),
        ),
        FileRecord::new(
            "src/utils.js",
            "function helper() { return true; }".into(),
            Some("javascript".into()),
        ),
    ];
    assert_eq!(records, expected);
}

#[test]
fn test_scan_paths_are_unique_and_not_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    for i in 0..20 {
        write(root, &format!("pkg{}/mod{}.rs", i % 4, i), "// module");
        write(root, &format!("pkg{}/icon{}.png", i % 4, i), "not really a png");
    }

    let scanner = Scanner::new(root);
    let report = scanner.scan().expect("scan should succeed");

    let unique: BTreeSet<&str> = report.records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(unique.len(), report.records.len());
    assert_eq!(report.records.len(), 20);
    assert!(report.records.iter().all(|r| !scanner.should_ignore(&r.path)));
}

#[test]
fn test_report_json_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "lib.rs", "pub fn f() {}");
    fs::write(temp_dir.path().join("blob.rs"), [0xFF_u8, 0x00]).expect("Failed to write file");

    let config = ScannerConfig::new(temp_dir.path());
    let report = Scanner::from_config(config)
        .expect("valid config")
        .scan()
        .expect("scan should succeed");

    let json = serde_json::to_value(&report).expect("Failed to serialize report");
    assert_eq!(json["records"][0]["path"], "lib.rs");
    assert_eq!(json["records"][0]["language"], "rust");
    assert_eq!(json["records"][0]["size"], 13);
    assert_eq!(json["failures"][0]["path"], "blob.rs");
    assert_eq!(json["failures"][0]["kind"], "decode");

    let back: ScanReport = serde_json::from_value(json).expect("Failed to deserialize report");
    assert_eq!(back.records, report.records);
}
