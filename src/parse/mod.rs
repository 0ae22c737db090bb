//! HTML feed scanning.
//!
//! This module extracts feed candidates from HTML markup:
//! - Explicit `<link type="application/rss+xml">`-style declarations
//! - Anchors that look like feed links
//! - Page title and icon used as feed defaults
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod feeds;
mod href;
mod html;

// Re-export public API
pub use feeds::{dedupe_feeds, is_feed_mime_type, scan_document, FEED_MIME_TYPES};
pub use href::resolve_href;
pub use html::{extract_icon_href, extract_title, page_icon_url};
