// Shared test helpers for loading the fixture catalog and building analyzers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::PathBuf;
use std::sync::Arc;

use feed_radar::{Analyzer, RuleCatalog};

/// Absolute path of a file under `tests/fixtures`.
#[allow(dead_code)] // Used by other test files
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Decodes `tests/fixtures/rules.json`.
#[allow(dead_code)] // Used by other test files
pub fn fixture_catalog() -> RuleCatalog {
    let json = std::fs::read_to_string(fixture_path("rules.json"))
        .expect("Failed to read fixture catalog");
    RuleCatalog::from_json_str(&json).expect("Fixture catalog should decode")
}

/// Analyzer over the fixture catalog with default configuration.
#[allow(dead_code)] // Used by other test files
pub fn fixture_analyzer() -> Analyzer {
    Analyzer::new(Arc::new(fixture_catalog()))
}
