//! Local file loading for rule catalogs.
//!
//! A catalog path is either a single JSON file or a directory of JSON files.
//! Directory files are merged in file-name order; a later file replaces whole
//! domain entries of an earlier one.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::models::RuleCatalog;

/// Loads a catalog from a local path (handles both single file and directory).
///
/// A single file must decode cleanly. In directory mode unreadable or invalid
/// files are skipped with a warning so one bad file does not take down the rest.
pub async fn load_from_path(path: &Path) -> Result<RuleCatalog> {
    if !path.is_dir() {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read rule catalog {}", path.display()))?;
        let catalog = RuleCatalog::from_json_str(&content)
            .with_context(|| format!("Failed to parse rule catalog {}", path.display()))?;
        log::debug!(
            "Loaded {} domains ({} rules) from {}",
            catalog.len(),
            catalog.rule_count(),
            path.display()
        );
        return Ok(catalog);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut entries = fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let file_path = entry.path();
        if file_path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(file_path);
        }
    }
    files.sort();

    let mut catalog = RuleCatalog::new();
    for file_path in files {
        let content = match fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read {}: {}", file_path.display(), e);
                continue;
            }
        };
        match RuleCatalog::from_json_str(&content) {
            Ok(part) => {
                log::debug!("Loaded {} domains from {}", part.len(), file_path.display());
                catalog.merge(part);
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}", file_path.display(), e);
            }
        }
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncWriteExt;

    const GITHUB: &str = r#"{
        "github.com": {
            "_name": "GitHub",
            ".": [{ "title": "Releases", "source": "/:user/:repo/releases", "target": "/github/release/:user/:repo" }]
        }
    }"#;

    #[tokio::test]
    async fn test_load_from_path_file_not_found() {
        let path = Path::new("nonexistent_catalog.json");
        let result = load_from_path(path).await;
        assert!(result.is_err());
        let error_msg = format!("{:#}", result.unwrap_err());
        assert!(
            error_msg.contains("No such file")
                || error_msg.contains("not found")
                || error_msg.contains("The system cannot find"),
            "Expected file not found error, got: {}",
            error_msg
        );
    }

    #[tokio::test]
    async fn test_load_from_path_invalid_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("invalid.json");
        let mut file = tokio::fs::File::create(&file_path)
            .await
            .expect("Failed to create test file");
        file.write_all(b"{ invalid json }")
            .await
            .expect("Failed to write invalid JSON");
        drop(file);

        let result = load_from_path(&file_path).await;
        assert!(result.is_err());
        let error_msg = result.unwrap_err().to_string();
        assert!(
            error_msg.contains("parse"),
            "Expected parse error, got: {}",
            error_msg
        );
    }

    #[tokio::test]
    async fn test_load_from_path_single_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("rules.json");
        tokio::fs::write(&file_path, GITHUB)
            .await
            .expect("Failed to write rules.json");

        let catalog = load_from_path(&file_path)
            .await
            .expect("Should load catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("github.com", "").len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_path_empty_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("empty.json");
        tokio::fs::write(&file_path, b"{}")
            .await
            .expect("Failed to write empty JSON");

        let catalog = load_from_path(&file_path)
            .await
            .expect("Empty object should load");
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_path_directory_merges_in_name_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir_path = temp_dir.path();

        let override_github = r#"{
            "github.com": { ".": [
                { "title": "Commits", "source": "/:user/:repo/commits", "target": "/github/commits/:user/:repo" },
                { "title": "Issues", "source": "/:user/:repo/issues", "target": "/github/issue/:user/:repo" }
            ] }
        }"#;
        let other = r#"{ "example.com": { ".": [{ "title": "Blog", "target": "/example/blog" }] } }"#;

        tokio::fs::write(dir_path.join("01-github.json"), GITHUB)
            .await
            .expect("Failed to write 01-github.json");
        tokio::fs::write(dir_path.join("02-override.json"), override_github)
            .await
            .expect("Failed to write 02-override.json");
        tokio::fs::write(dir_path.join("03-example.json"), other)
            .await
            .expect("Failed to write 03-example.json");
        tokio::fs::write(dir_path.join("readme.txt"), "Not a JSON file")
            .await
            .expect("Failed to write readme.txt");

        let catalog = load_from_path(dir_path)
            .await
            .expect("Directory should load");
        assert_eq!(catalog.len(), 2);

        let github = catalog.domain("github.com").expect("github.com entry");
        // Whole-domain replacement: the display name of the first file is gone
        assert_eq!(github.display_name, None);
        let titles: Vec<&str> = catalog
            .lookup("github.com", "")
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Commits", "Issues"]);
        assert_eq!(catalog.lookup("example.com", "www").len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_path_directory_skips_invalid_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir_path = temp_dir.path();

        tokio::fs::write(dir_path.join("valid.json"), GITHUB)
            .await
            .expect("Failed to write valid.json");
        tokio::fs::write(dir_path.join("invalid.json"), b"{ invalid json }")
            .await
            .expect("Failed to write invalid.json");
        tokio::fs::write(
            dir_path.join("bad-rule.json"),
            br#"{ "example.com": { ".": [{ "target": "/no/title" }] } }"#,
        )
        .await
        .expect("Failed to write bad-rule.json");

        let catalog = load_from_path(dir_path)
            .await
            .expect("Directory should load despite bad files");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.domain("github.com").is_some());
        assert!(catalog.domain("example.com").is_none());
    }
}
