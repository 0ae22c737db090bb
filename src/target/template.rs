//! Target template rendering.
//!
//! Templates carry `/:name` (required) and `/:name?` (optional) placeholders.
//! A missing required value fails the whole render; a missing optional value
//! removes the placeholder together with its leading slash. A `?` followed by
//! anything other than `/` is a literal query-string separator.

use regex::Regex;
use std::sync::LazyLock;

use crate::router::MatchParams;

const PLACEHOLDER_PATTERN: &str = r"/:([A-Za-z0-9_]+)(\?)?";

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PLACEHOLDER_PATTERN).expect("Failed to compile placeholder regex - this is a bug")
});

/// Substitutes route parameters into a template.
///
/// # Returns
///
/// The rendered string, or `None` if a required placeholder has no value.
pub fn render_template(template: &str, params: &MatchParams) -> Option<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str();
        // `?` marks an optional placeholder only before `/` or the end;
        // otherwise it starts a query string and is kept as text.
        let marker = caps.get(2);
        let optional = marker
            .map(|m| matches!(template.as_bytes().get(m.end()), None | Some(b'/')))
            .unwrap_or(false);
        let end = match marker {
            Some(m) if !optional => m.start(),
            _ => whole.end(),
        };

        rendered.push_str(&template[last..whole.start()]);
        match params.get(name) {
            Some(value) => {
                rendered.push('/');
                rendered.push_str(value);
            }
            None if optional => {}
            None => {
                log::trace!("Template '{}' is missing parameter '{}'", template, name);
                return None;
            }
        }
        last = end;
    }

    rendered.push_str(&template[last..]);
    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> MatchParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_render_required_placeholders() {
        let p = params(&[("user", "alice"), ("repo", "proj")]);
        assert_eq!(
            render_template("/:user/:repo/releases.atom", &p).as_deref(),
            Some("/alice/proj/releases.atom")
        );
    }

    #[test]
    fn test_render_missing_required_fails() {
        let p = params(&[("user", "alice")]);
        assert_eq!(render_template("/:user/:repo/releases.atom", &p), None);
    }

    #[test]
    fn test_render_optional_present() {
        let p = params(&[("id", "42"), ("type", "video")]);
        assert_eq!(
            render_template("/bilibili/user/:id/:type?", &p).as_deref(),
            Some("/bilibili/user/42/video")
        );
    }

    #[test]
    fn test_render_optional_absent_is_removed() {
        let p = params(&[("id", "42")]);
        assert_eq!(
            render_template("/bilibili/user/:id/:type?", &p).as_deref(),
            Some("/bilibili/user/42")
        );
        assert_eq!(
            render_template("/list/:category?/latest", &p).as_deref(),
            Some("/list/latest")
        );
    }

    #[test]
    fn test_render_keeps_query_string_after_placeholder() {
        let p = params(&[("id", "42")]);
        assert_eq!(
            render_template("https://example.com/feeds/:id?format=rss", &p).as_deref(),
            Some("https://example.com/feeds/42?format=rss")
        );
        assert_eq!(
            render_template("/feeds/:id?format=rss&lang=en", &p).as_deref(),
            Some("/feeds/42?format=rss&lang=en")
        );
        // Followed by a query string, the placeholder is required
        assert_eq!(render_template("/feeds/:slug?format=rss", &p), None);
    }

    #[test]
    fn test_render_without_placeholders() {
        let p = MatchParams::new();
        assert_eq!(
            render_template("/feed.xml", &p).as_deref(),
            Some("/feed.xml")
        );
        assert_eq!(
            render_template("https://example.com/rss", &p).as_deref(),
            Some("https://example.com/rss")
        );
    }

    #[test]
    fn test_render_absolute_url_template() {
        let p = params(&[("name", "rust")]);
        assert_eq!(
            render_template("https://www.reddit.com/r/:name/.rss", &p).as_deref(),
            Some("https://www.reddit.com/r/rust/.rss")
        );
    }

    #[test]
    fn test_render_ignores_unused_params() {
        let p = params(&[("user", "alice"), ("unused", "x")]);
        assert_eq!(
            render_template("/u/:user", &p).as_deref(),
            Some("/u/alice")
        );
    }
}
