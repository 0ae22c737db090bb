//! Path routing for rule sources.
//!
//! A [`Router`] holds the compiled source patterns of one rule list, each tagged
//! with the index of the rule it belongs to. Recognizing a path yields at most
//! one match per rule (its first matching source), and every matching rule is
//! reported: there is no first-rule-wins short-circuit.

mod pattern;

pub use pattern::{MatchParams, RoutePattern};

/// A successful match of one rule against a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Index of the matched rule within its rule list
    pub rule_index: usize,
    /// The source pattern that matched
    pub pattern: String,
    /// Parameters extracted by that pattern
    pub params: MatchParams,
}

/// Ordered collection of `(pattern, rule index)` routes.
#[derive(Debug, Clone, Default)]
pub struct Router<'a> {
    routes: Vec<(&'a RoutePattern, usize)>,
}

impl<'a> Router<'a> {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every source pattern of one rule.
    pub fn add<I>(&mut self, patterns: I, rule_index: usize)
    where
        I: IntoIterator<Item = &'a RoutePattern>,
    {
        for pattern in patterns {
            self.routes.push((pattern, rule_index));
        }
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes were added.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Matches `path` against all routes.
    ///
    /// Results are ordered by rule index; each rule appears at most once, with
    /// the parameters of its first matching source.
    pub fn recognize(&self, path: &str) -> Vec<RouteMatch> {
        let mut matches: Vec<RouteMatch> = Vec::new();
        for (pattern, rule_index) in &self.routes {
            if matches.iter().any(|m| m.rule_index == *rule_index) {
                continue;
            }
            if let Some(params) = pattern.matches(path) {
                matches.push(RouteMatch {
                    rule_index: *rule_index,
                    pattern: pattern.as_str().to_string(),
                    params,
                });
            }
        }
        matches.sort_by_key(|m| m.rule_index);
        matches
    }
}
