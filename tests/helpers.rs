// Shared test helpers for provider files and configuration.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::PathBuf;

use blcheck::Config;
use tempfile::TempDir;

/// Writes `contents` to a provider list inside a fresh temporary directory.
/// The directory must be kept alive for as long as the file is used.
#[allow(dead_code)] // Used by other test files
pub fn write_provider_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("bl_list");
    std::fs::write(&path, contents).expect("Failed to write provider list");
    (dir, path)
}

/// Builds a configuration for `target` that dispatches without throttling.
#[allow(dead_code)] // Used by other test files
pub fn test_config(target: &str, blacklist: PathBuf) -> Config {
    Config {
        target: target.to_string(),
        blacklist,
        throughput: 0,
        ..Default::default()
    }
}
