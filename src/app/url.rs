//! URL validation and normalization for command-line input.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a page URL typed by a user.
///
/// Adds an `https://` prefix when no scheme is present, then requires the
/// result to parse as an http(s) URL with a host. Rejects URLs longer than
/// `MAX_URL_LENGTH`, before and after normalization.
///
/// # Returns
///
/// `Some(normalized_url)` if the URL can be analyzed, `None` otherwise (a
/// warning says why).
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();

    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            truncate(url)
        );
        return None;
    }

    let has_scheme = url.contains("://");
    let normalized = if has_scheme {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting normalized URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            truncate(&normalized)
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
                Some(normalized)
            }
            "http" | "https" => {
                warn!("Rejecting URL without a host: {url}");
                None
            }
            scheme => {
                warn!("Rejecting unsupported scheme '{scheme}' for URL: {url}");
                None
            }
        },
        Err(e) => {
            warn!("Rejecting invalid URL {url}: {e}");
            None
        }
    }
}

fn truncate(s: &str) -> &str {
    let mut end = 50.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
