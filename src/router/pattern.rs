//! Route pattern parsing and matching.
//!
//! Pattern syntax:
//! - `/static` - literal segment, compared exactly
//! - `/:name` - named capture of one non-empty segment
//! - `/:name?` - optional named capture (omitted from params when absent)
//! - `/:name.html` - named capture followed by a literal suffix
//! - `/*` or `/*name` - trailing wildcard capturing the rest of the path
//!
//! Matching is anchored to the whole path. Empty segments (and so trailing
//! slashes) are ignored on both sides.

use std::collections::BTreeMap;

use crate::config::WILDCARD_PARAM;
use crate::error_handling::CatalogError;

/// Named values extracted from a concrete path by one successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchParams(BTreeMap<String, String>);

impl MatchParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether `name` was captured.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    fn remove(&mut self, name: &str) {
        self.0.remove(name);
    }

    /// Number of captured parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MatchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = MatchParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param {
        name: String,
        optional: bool,
        suffix: String,
    },
    Wildcard(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern string.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPattern` for an unnamed capture (`/:`),
    /// or a wildcard that is not the last segment.
    pub fn parse(pattern: &str) -> Result<Self, CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = split_path(pattern).collect();
        let mut segments = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            if let Some(name) = part.strip_prefix('*') {
                if i + 1 != parts.len() {
                    return Err(invalid("wildcard must be the last segment"));
                }
                let name = if name.is_empty() { WILDCARD_PARAM } else { name };
                segments.push(Segment::Wildcard(name.to_string()));
            } else if let Some(rest) = part.strip_prefix(':') {
                let name_len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                if name_len == 0 {
                    return Err(invalid("named segment without a name"));
                }
                let (name, rest) = rest.split_at(name_len);
                let (optional, suffix) = match rest.strip_prefix('?') {
                    Some(suffix) => (true, suffix),
                    None => (false, rest),
                };
                segments.push(Segment::Param {
                    name: name.to_string(),
                    optional,
                    suffix: suffix.to_string(),
                });
            } else {
                segments.push(Segment::Static((*part).to_string()));
            }
        }

        Ok(RoutePattern {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Returns the pattern as written in the catalog.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a concrete path (no query string) against this pattern.
    ///
    /// # Returns
    ///
    /// The extracted parameters, or `None` if the whole path does not match.
    pub fn matches(&self, path: &str) -> Option<MatchParams> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut params = MatchParams::new();
        if match_segments(&self.segments, &parts, &mut params) {
            Some(params)
        } else {
            None
        }
    }
}

/// Splits a path into its non-empty segments.
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(segments: &[Segment], parts: &[&str], params: &mut MatchParams) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return parts.is_empty();
    };

    match segment {
        Segment::Static(expected) => match parts.split_first() {
            Some((first, tail)) if first == expected => match_segments(rest, tail, params),
            _ => false,
        },
        Segment::Param {
            name,
            optional,
            suffix,
        } => {
            if let Some((first, tail)) = parts.split_first() {
                if let Some(value) = capture(first, suffix) {
                    params.insert(name.as_str(), value);
                    if match_segments(rest, tail, params) {
                        return true;
                    }
                    params.remove(name);
                }
            }
            // Optional segment absent: try the rest of the pattern on the same parts.
            *optional && match_segments(rest, parts, params)
        }
        Segment::Wildcard(name) => {
            if parts.is_empty() {
                return false;
            }
            params.insert(name.as_str(), parts.join("/"));
            true
        }
    }
}

fn capture<'a>(part: &'a str, suffix: &str) -> Option<&'a str> {
    let value = part.strip_suffix(suffix)?;
    (!value.is_empty()).then_some(value)
}
