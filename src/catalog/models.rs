//! Data structures for the rule catalog.
//!
//! This module contains the core data structures used for rule lookup:
//! - `Rule`: One feed rule (sources, target, verification)
//! - `DomainEntry`: The rules of one registrable domain, keyed by subdomain selector
//! - `RuleCatalog`: All domain entries
//!
//! The serialized catalog is decoded in two steps: serde reads the raw JSON
//! shapes, then [`RuleCatalog::from_json_value`] validates the nesting and
//! compiles patterns, so every structural problem becomes a [`CatalogError`]
//! naming the offending domain, selector and rule.

use serde::Deserialize;
use std::collections::HashMap;

use crate::config::{
    APEX_FALLBACK_SUBDOMAINS, APEX_SELECTOR, DEFAULT_SOURCES, DISPLAY_NAME_KEY,
    EMPTY_SUBDOMAIN_FALLBACK, RESERVED_KEY_PREFIX,
};
use crate::error_handling::CatalogError;
use crate::router::RoutePattern;
use crate::target::{RawTarget, RawVerification, TargetKind, TargetSpec, Verification};

/// One entry in a domain's rule list.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Human-readable description, used as the feed title
    pub title: String,
    /// Compiled source patterns, in catalog order
    pub sources: Vec<RoutePattern>,
    /// How the resolved target is interpreted
    pub target_kind: TargetKind,
    /// How the target string is computed
    pub target: TargetSpec,
    /// Optional guard over the route parameters
    pub verification: Option<Verification>,
    /// Documentation link for aggregator paths
    pub docs_url: Option<String>,
}

/// Serialized rule as it appears in the catalog JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    title: String,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_array")]
    source: Option<Vec<String>>,
    #[serde(default)]
    target_type: TargetKind,
    target: RawTarget,
    #[serde(default)]
    verification: Option<RawVerification>,
    #[serde(default)]
    docs: Option<String>,
}

/// Deserializes a field that can be either a string or an array of strings
fn deserialize_string_or_array<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct StringOrArrayVisitor;

    impl<'de> Visitor<'de> for StringOrArrayVisitor {
        type Value = Option<Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or an array of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value]))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(elem) = seq.next_element::<String>()? {
                vec.push(elem);
            }
            Ok(Some(vec))
        }
    }

    deserializer.deserialize_any(StringOrArrayVisitor)
}

impl RawRule {
    fn compile(self) -> Result<Rule, String> {
        let sources = match self.source {
            None => DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            Some(sources) if sources.is_empty() => {
                return Err("`source` must not be an empty list".to_string())
            }
            Some(sources) => sources,
        };

        let sources = sources
            .iter()
            .map(|s| RoutePattern::parse(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;

        Ok(Rule {
            title: self.title,
            sources,
            target_kind: self.target_type,
            target: self.target.compile().map_err(|e| e.to_string())?,
            verification: self
                .verification
                .map(RawVerification::compile)
                .transpose()
                .map_err(|e| e.to_string())?,
            docs_url: self.docs,
        })
    }
}

/// Rules of one registrable domain.
#[derive(Debug, Clone, Default)]
pub struct DomainEntry {
    /// Display name from the `_name` metadata key
    pub display_name: Option<String>,
    /// Subdomain selector (`"."` for apex) → ordered rules
    pub subdomain_rules: HashMap<String, Vec<Rule>>,
}

impl DomainEntry {
    /// Returns the rules for a subdomain (`""` for apex hosts), applying the
    /// fallback policy:
    ///
    /// 1. exact selector (`"."` for an empty subdomain)
    /// 2. `www`, `mobile` and `m` fall back to `"."`
    /// 3. an empty subdomain falls back to `www`
    /// 4. otherwise nothing
    pub fn rules_for(&self, subdomain: &str) -> &[Rule] {
        let selector = if subdomain.is_empty() {
            APEX_SELECTOR
        } else {
            subdomain
        };
        if let Some(rules) = self.subdomain_rules.get(selector) {
            return rules;
        }

        let fallback = if APEX_FALLBACK_SUBDOMAINS.contains(&subdomain) {
            Some(APEX_SELECTOR)
        } else if subdomain.is_empty() {
            Some(EMPTY_SUBDOMAIN_FALLBACK)
        } else {
            None
        };

        fallback
            .and_then(|selector| self.subdomain_rules.get(selector))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of rules across all selectors.
    pub fn rule_count(&self) -> usize {
        self.subdomain_rules.values().map(Vec::len).sum()
    }

    fn from_json_value(domain: &str, value: serde_json::Value) -> Result<Self, CatalogError> {
        let serde_json::Value::Object(map) = value else {
            return Err(CatalogError::InvalidDomain {
                domain: domain.to_string(),
                reason: "expected an object of subdomain selectors".to_string(),
            });
        };

        let mut entry = DomainEntry::default();
        for (key, value) in map {
            if key.starts_with(RESERVED_KEY_PREFIX) {
                if key == DISPLAY_NAME_KEY {
                    entry.display_name = value.as_str().map(str::to_string);
                }
                continue;
            }

            let selector = key.to_ascii_lowercase();
            let serde_json::Value::Array(raw_rules) = value else {
                return Err(CatalogError::InvalidSelector {
                    domain: domain.to_string(),
                    selector,
                    reason: "expected an array of rules".to_string(),
                });
            };

            let mut rules = Vec::with_capacity(raw_rules.len());
            for (index, raw) in raw_rules.into_iter().enumerate() {
                let invalid = |reason: String| CatalogError::InvalidRule {
                    domain: domain.to_string(),
                    selector: selector.clone(),
                    index,
                    reason,
                };
                let raw: RawRule =
                    serde_json::from_value(raw).map_err(|e| invalid(e.to_string()))?;
                rules.push(raw.compile().map_err(invalid)?);
            }
            entry.subdomain_rules.insert(selector, rules);
        }

        Ok(entry)
    }
}

/// All rules, keyed by registrable domain.
///
/// A catalog is immutable once built; hot reloading swaps whole catalogs (see
/// [`crate::catalog::CatalogStore`]).
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    domains: HashMap<String, DomainEntry>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a catalog from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for invalid JSON or any structurally invalid
    /// entry; no partially decoded catalog is ever returned.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Decodes a catalog from an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, CatalogError> {
        let serde_json::Value::Object(map) = value else {
            return Err(CatalogError::InvalidDomain {
                domain: String::new(),
                reason: "catalog root must be an object keyed by domain".to_string(),
            });
        };

        let mut catalog = RuleCatalog::new();
        for (domain, value) in map {
            let domain = domain.trim().to_ascii_lowercase();
            if domain.is_empty() {
                return Err(CatalogError::InvalidDomain {
                    domain,
                    reason: "domain key must not be empty".to_string(),
                });
            }
            let entry = DomainEntry::from_json_value(&domain, value)?;
            catalog.domains.insert(domain, entry);
        }
        Ok(catalog)
    }

    /// Adds or replaces a domain entry.
    pub fn insert(&mut self, domain: impl Into<String>, entry: DomainEntry) {
        self.domains.insert(domain.into().to_ascii_lowercase(), entry);
    }

    /// Merges `other` into `self`; entries of `other` replace whole domains.
    pub fn merge(&mut self, other: RuleCatalog) {
        self.domains.extend(other.domains);
    }

    /// Returns the entry for a registrable domain.
    pub fn domain(&self, domain: &str) -> Option<&DomainEntry> {
        self.domains.get(domain)
    }

    /// Looks up the rules for `domain` / `subdomain` with the fallback policy of
    /// [`DomainEntry::rules_for`]. Unknown domains yield an empty slice.
    pub fn lookup(&self, domain: &str, subdomain: &str) -> &[Rule] {
        self.domains
            .get(domain)
            .map(|entry| entry.rules_for(subdomain))
            .unwrap_or(&[])
    }

    /// Number of domains.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the catalog has no domains.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Total number of rules across all domains.
    pub fn rule_count(&self) -> usize {
        self.domains.values().map(DomainEntry::rule_count).sum()
    }
}
