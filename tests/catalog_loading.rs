//! Loading rule catalogs from disk.

mod helpers;

use std::sync::Arc;

use feed_radar::{load_catalog, Analyzer, CatalogStore};
use helpers::fixture_path;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_fixture_file() {
    let catalog = load_catalog(&fixture_path("rules.json"))
        .await
        .expect("fixture loads");

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.rule_count(), 7);
    assert_eq!(
        catalog
            .domain("github.com")
            .and_then(|entry| entry.display_name.as_deref()),
        Some("GitHub")
    );
    assert_eq!(catalog.lookup("youtube.com", "m").len(), 0);
    assert_eq!(catalog.lookup("youtube.com", "").len(), 2);
}

#[tokio::test]
async fn test_load_directory_overrides_domains() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::copy(fixture_path("rules.json"), temp_dir.path().join("00-base.json"))
        .expect("Failed to copy fixture");
    std::fs::write(
        temp_dir.path().join("10-local.json"),
        r#"{ "github.com": { ".": [{ "title": "Stars", "source": "/:user", "target": "/github/starred/:user" }] } }"#,
    )
    .expect("Failed to write override");

    let catalog = load_catalog(temp_dir.path()).await.expect("directory loads");
    assert_eq!(catalog.len(), 3);

    let analyzer = Analyzer::new(Arc::new(catalog));
    let result = analyzer
        .analyze("https://github.com/alice", None)
        .expect("analysis succeeds");
    assert_eq!(result.aggregator_feeds.len(), 1);
    assert_eq!(result.aggregator_feeds[0].path, "/github/starred/alice");

    // The override replaced the whole domain entry
    let releases = analyzer
        .analyze("https://github.com/alice/proj/releases", None)
        .expect("analysis succeeds");
    assert!(releases.is_empty());
}

#[tokio::test]
async fn test_load_missing_path_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let result = load_catalog(&temp_dir.path().join("absent.json")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_store_reload_swaps_catalog() {
    let store = CatalogStore::default();
    assert!(store.snapshot().await.is_empty());

    store
        .reload(&fixture_path("rules.json"))
        .await
        .expect("reload succeeds");
    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.len(), 3);

    let analyzer = Analyzer::new(snapshot);
    let result = analyzer
        .analyze("https://github.com/alice/proj/issues", None)
        .expect("analysis succeeds");
    assert_eq!(result.aggregator_feeds[0].path, "/github/issue/alice/proj");
}
