//! Rule catalog.
//!
//! This module handles:
//! - Decoding the catalog JSON (domain → subdomain selector → rules)
//! - Subdomain lookup with the `www` / apex fallback policy
//! - Loading catalogs from a file or a directory of files
//! - Sharing a catalog that can be replaced at runtime

mod local;
mod models;
mod store;

pub use local::load_from_path;
pub use models::{DomainEntry, Rule, RuleCatalog};
pub use store::CatalogStore;
