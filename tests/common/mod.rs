// tests/common/mod.rs

//! Shared fixtures for integration tests

use std::fs;
use tempfile::TempDir;

/// Create a temp directory populated with (relative name, content) files.
/// Parent directories are created as needed.
pub fn fixture_tree(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
    }
    dir
}

/// Names of a package's files, in manifest (display) order
#[allow(dead_code)]
pub fn file_names(pkg: &sbomedit::Package) -> Vec<String> {
    pkg.files().iter().map(|f| f.name().to_string()).collect()
}
