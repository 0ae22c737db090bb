//! Shared, hot-swappable catalog handle.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::local::load_from_path;
use super::models::RuleCatalog;

/// Holds the current catalog behind a lock.
///
/// Readers take an `Arc` snapshot and keep using it for the whole analysis, so a
/// concurrent [`CatalogStore::replace`] never changes rules mid-call.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<RuleCatalog>>>,
}

impl CatalogStore {
    /// Wraps an initial catalog.
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Returns the catalog in effect right now.
    pub async fn snapshot(&self) -> Arc<RuleCatalog> {
        self.current.read().await.clone()
    }

    /// Swaps in a new catalog and returns the previous one.
    pub async fn replace(&self, catalog: RuleCatalog) -> Arc<RuleCatalog> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }

    /// Loads `path` and swaps it in. On failure the current catalog stays.
    pub async fn reload(&self, path: &Path) -> Result<()> {
        let catalog = load_from_path(path).await?;
        log::info!(
            "Reloaded rule catalog from {}: {} domains, {} rules",
            path.display(),
            catalog.len(),
            catalog.rule_count()
        );
        self.replace(catalog).await;
        Ok(())
    }
}
