//! Basic HTML extraction utilities.
//!
//! This module provides functions to extract page-level metadata used as feed
//! defaults:
//! - Page title
//! - Declared page icon

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::config::FAVICON_PATH;

use super::href::resolve_href;

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "title";
const ICON_SELECTOR_STR: &str = "link[rel~='icon'][href]";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(TITLE_SELECTOR_STR, "TITLE_SELECTOR"));

static ICON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(ICON_SELECTOR_STR, "ICON_SELECTOR"));

/// Extracts the page title from an HTML document.
///
/// Searches for the first `<title>` element and returns its text content,
/// trimmed of whitespace.
///
/// # Returns
///
/// The page title, or `None` if there is no non-empty `<title>`.
pub fn extract_title(document: &Html) -> Option<String> {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())?;

    log::trace!("Extracted title text: '{}'", title);
    (!title.is_empty()).then_some(title)
}

/// Returns the `href` of the first `<link rel="icon">` (any rel list containing `icon`).
pub fn extract_icon_href(document: &Html) -> Option<&str> {
    document
        .select(&ICON_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
}

/// Builds the fallback `/favicon.ico` URL from the page origin.
pub fn fallback_icon_url(page_url: &Url) -> String {
    format!("{}{}", page_url.origin().ascii_serialization(), FAVICON_PATH)
}

/// Picks the image for feeds found on a page.
///
/// 1. The page's declared icon, resolved against `page_url`
/// 2. Otherwise `{origin}/favicon.ico`
pub fn page_icon_url(document: Option<&Html>, page_url: &Url) -> String {
    document
        .and_then(extract_icon_href)
        .and_then(|href| resolve_href(href, page_url))
        .unwrap_or_else(|| fallback_icon_url(page_url))
}
