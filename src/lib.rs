//! feed_radar library: feed discovery for web pages
//!
//! Given a page URL (and optionally its HTML), this library finds RSS/Atom feed
//! candidates from two channels:
//! - a declarative per-domain rule catalog mapping URL path shapes to feed URLs
//!   or aggregator paths
//! - heuristic scanning of the HTML for feed `<link>` declarations and
//!   feed-looking anchors
//!
//! The engine does no network I/O and keeps no state between calls.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use feed_radar::{AnalysisResult, Analyzer, RuleCatalog};
//!
//! let catalog = RuleCatalog::from_json_str(r#"{
//!     "github.com": {
//!         "_name": "GitHub",
//!         ".": [{
//!             "title": "Commits",
//!             "source": "/:user/:repo/commits",
//!             "target": "/github/commits/:user/:repo"
//!         }]
//!     }
//! }"#)?;
//! let analyzer = Analyzer::new(Arc::new(catalog));
//!
//! let url = "https://github.com/alice/proj/commits";
//! let first = analyzer.analyze(url, None)?;
//! let second = analyzer.analyze(url, Some("<html><head></head></html>"))?;
//! let result = AnalysisResult::refine([first, second]);
//!
//! assert_eq!(result.aggregator_feeds[0].path, "/github/commits/alice/proj");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Requirements
//!
//! Analysis is synchronous. Loading catalogs from disk
//! ([`load_catalog`], [`CatalogStore::reload`]) needs a Tokio runtime.

#![warn(missing_docs)]

mod analyze;
mod app;
mod catalog;
pub mod config;
mod domain;
mod error_handling;
pub mod initialization;
mod models;
mod parse;
mod router;
mod target;
mod utils;

// Re-export public API
pub use analyze::Analyzer;
pub use app::{render_plain, render_result, validate_and_normalize_url};
pub use catalog::{load_from_path as load_catalog, CatalogStore, DomainEntry, Rule, RuleCatalog};
pub use config::{AnalyzerConfig, LogFormat, LogLevel, Opt, OutputFormat};
pub use domain::{split_host, split_url_host, HostParts};
pub use error_handling::{
    AnalysisError, CatalogError, InitializationError, SkipReason, SkipStats,
};
pub use models::{AggregatorFeed, AnalysisResult, DetectedFeed, RssFeed};
pub use parse::{extract_title, page_icon_url, resolve_href, scan_document};
pub use router::{MatchParams, RouteMatch, RoutePattern, Router};
pub use target::{
    render_template, resolve_target, CallbackRegistry, ResolvedTarget, TargetCallback,
    TargetContext, TargetKind, TargetSpec, Verification, VerificationCallback,
};
