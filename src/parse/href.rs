//! Link target resolution for scanned markup.
//!
//! Resolution is simpler than RFC 3986: relative hrefs that are
//! neither protocol-relative nor root-relative are appended to the page URL.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const SCHEME_PATTERN: &str = r"^([A-Za-z][A-Za-z0-9+.\-]*):";
const HTTP_PREFIX_PATTERN: &str = r"^(?i:https?:)?//";

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SCHEME_PATTERN).expect("Failed to compile scheme regex - this is a bug")
});

static HTTP_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(HTTP_PREFIX_PATTERN).expect("Failed to compile http prefix regex - this is a bug")
});

/// Resolves an `href` found on `page_url`.
///
/// - `//host/path` inherits the page scheme
/// - `/path` resolves against the page origin
/// - `http(s)://...` is used as-is
/// - anything else is appended to the page URL (trailing `/` trimmed)
///
/// # Returns
///
/// `None` for empty or fragment-only hrefs and for non-http schemes
/// (`javascript:`, `mailto:`, ...).
pub fn resolve_href(href: &str, page_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("{}://{}", page_url.scheme(), rest));
    }

    if let Some(caps) = SCHEME_RE.captures(href) {
        let scheme = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
        return match scheme.as_deref() {
            Some("http") | Some("https") => Some(href.to_string()),
            _ => None,
        };
    }

    if href.starts_with('/') {
        return Some(format!("{}{}", page_url.origin().ascii_serialization(), href));
    }

    Some(format!(
        "{}/{}",
        page_url.as_str().trim_end_matches('/'),
        href
    ))
}

/// Key used to collapse feeds that differ only by `http`/`https`.
pub fn dedupe_key(url: &str) -> &str {
    match HTTP_PREFIX_RE.find(url) {
        Some(m) => &url[m.end()..],
        None => url,
    }
}
