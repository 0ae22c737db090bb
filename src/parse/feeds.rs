//! Feed link discovery in HTML markup.
//!
//! Two independent heuristics:
//! - `<link>` elements declaring a feed MIME type (certain)
//! - `<a>` elements whose href or wording looks like a feed (uncertain)
//!
//! Results are concatenated in that order and deduplicated on the URL without
//! its `http(s)://` prefix; the first occurrence wins.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

use crate::models::RssFeed;

use super::href::{dedupe_key, resolve_href};
use super::html::{extract_title, page_icon_url};

/// MIME types accepted on `<link type=...>`.
pub const FEED_MIME_TYPES: &[&str] = &[
    "application/rss+xml",
    "application/atom+xml",
    "application/rdf+xml",
    "application/rss",
    "application/atom",
    "application/rdf",
    "text/rss+xml",
    "text/atom+xml",
    "text/rdf+xml",
    "text/rss",
    "text/atom",
    "text/rdf",
];

const LINK_SELECTOR_STR: &str = "link[type][href]";
const ANCHOR_SELECTOR_STR: &str = "a[href]";

const FEED_HREF_PATTERN: &str = r"/(feed|rss|atom)(\.(xml|rss|atom))?$";
const RSS_WORD_PATTERN: &str = r"(?i)\brss\b";

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(LINK_SELECTOR_STR, "LINK_SELECTOR"));

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(ANCHOR_SELECTOR_STR, "ANCHOR_SELECTOR"));

static FEED_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(FEED_HREF_PATTERN).expect("Failed to compile feed href regex - this is a bug")
});

static RSS_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(RSS_WORD_PATTERN).expect("Failed to compile rss word regex - this is a bug")
});

/// Returns `true` if `mime` (case-insensitive, surrounding whitespace ignored)
/// is a known feed MIME type.
pub fn is_feed_mime_type(mime: &str) -> bool {
    let mime = mime.trim();
    FEED_MIME_TYPES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(mime))
}

/// Scans a parsed page for feeds.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `page_url` - URL the document was served from, used to resolve hrefs
/// * `include_anchors` - Whether to run the anchor heuristics
///
/// # Returns
///
/// Feeds in document order, `<link>` declarations first. The output depends
/// only on the inputs; scanning the same document twice gives the same list.
pub fn scan_document(document: &Html, page_url: &Url, include_anchors: bool) -> Vec<RssFeed> {
    let page_title = extract_title(document).unwrap_or_default();
    let image = page_icon_url(Some(document), page_url);

    let mut candidates = scan_links(document, page_url, &page_title, &image);
    if include_anchors {
        candidates.extend(scan_anchors(document, page_url, &page_title, &image));
    }

    let found = candidates.len();
    let feeds = dedupe_feeds(candidates);
    log::debug!(
        "HTML scan of {} found {} feed candidates ({} after dedupe)",
        page_url,
        found,
        feeds.len()
    );
    feeds
}

/// Removes feeds whose URL only differs by scheme from an earlier one.
pub fn dedupe_feeds(feeds: Vec<RssFeed>) -> Vec<RssFeed> {
    let mut seen: HashSet<String> = HashSet::new();
    feeds
        .into_iter()
        .filter(|feed| seen.insert(dedupe_key(&feed.url).to_string()))
        .collect()
}

fn scan_links(document: &Html, page_url: &Url, page_title: &str, image: &str) -> Vec<RssFeed> {
    document
        .select(&LINK_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("type")
                .map(is_feed_mime_type)
                .unwrap_or(false)
        })
        .filter_map(|element| {
            let url = resolve_href(element.value().attr("href")?, page_url)?;
            let title = non_empty_attr(&element, "title").unwrap_or(page_title);
            Some(RssFeed {
                title: title.to_string(),
                url,
                image: image.to_string(),
                is_certain: true,
            })
        })
        .collect()
}

fn scan_anchors(document: &Html, page_url: &Url, page_title: &str, image: &str) -> Vec<RssFeed> {
    let mut feeds = Vec::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        let Some(url) = resolve_href(href, page_url) else {
            continue;
        };

        let text = element.text().collect::<String>();
        let text = text.trim();
        let title_attr = non_empty_attr(&element, "title");

        let looks_like_feed = FEED_HREF_RE.is_match(href)
            || RSS_WORD_RE.is_match(text)
            || element
                .value()
                .attr("class")
                .map(|class| RSS_WORD_RE.is_match(class))
                .unwrap_or(false)
            || title_attr
                .map(|title| RSS_WORD_RE.is_match(title))
                .unwrap_or(false);
        if !looks_like_feed {
            continue;
        }

        let title = title_attr
            .or_else(|| (!text.is_empty()).then_some(text))
            .unwrap_or(page_title);
        feeds.push(RssFeed {
            title: title.to_string(),
            url,
            image: image.to_string(),
            is_certain: false,
        });
    }

    feeds
}

fn non_empty_attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
