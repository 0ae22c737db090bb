//! Target and verification definitions.
//!
//! The catalog's serialized form (`Raw*` types) is decoded with serde and then
//! compiled: regexes and CSS selectors are parsed once at load time, so a bad
//! rule is reported as a [`CatalogError`] instead of failing on every page.

use regex::Regex;
use scraper::Selector;
use serde::Deserialize;

use crate::config::DEFAULT_DOCUMENT_PARAM;
use crate::error_handling::{CatalogError, SkipReason};
use crate::router::MatchParams;
use crate::utils::parse_selector;

use super::callbacks::{CallbackRegistry, TargetContext};
use super::template::render_template;

/// How a rule turns a match into a target string.
#[derive(Debug, Clone)]
pub enum TargetSpec {
    /// Template over route parameters (`/:name`, `/:name?`).
    Template(String),
    /// Copies a query parameter of the page URL into the params, then templates.
    QueryParam {
        /// Query parameter to read
        param: String,
        /// Route parameter name it is stored under
        into: String,
        /// Template rendered afterwards
        template: String,
    },
    /// Regex replacement over the page path.
    PathRewrite {
        /// Regex applied to the page path
        pattern: Regex,
        /// Replacement, with `$1`-style group references
        replacement: String,
    },
    /// Appends a query string to a template result or to the page path.
    AppendQuery {
        /// Query string without the leading `?`
        query: String,
        /// Template for the base; the page path when absent
        template: Option<String>,
    },
    /// Reads a value from the parsed document, then templates. Needs HTML.
    Document {
        /// Element to read
        selector: Selector,
        /// Attribute to read; the element text when absent
        attribute: Option<String>,
        /// Regex whose first group narrows the value
        capture: Option<Regex>,
        /// Route parameter name the value is stored under
        into: String,
        /// Template rendered afterwards
        template: String,
    },
    /// Host-registered callback, looked up by name.
    Callback(String),
}

impl TargetSpec {
    /// Whether resolving this target needs the parsed document.
    pub fn requires_document(&self, callbacks: &CallbackRegistry) -> bool {
        match self {
            TargetSpec::Document { .. } => true,
            TargetSpec::Callback(name) => callbacks.target_requires_document(name),
            _ => false,
        }
    }

    /// Resolves the raw target string.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] explaining why this rule instance yields no feed.
    pub fn resolve(
        &self,
        ctx: &TargetContext<'_>,
        callbacks: &CallbackRegistry,
    ) -> Result<String, SkipReason> {
        let target = match self {
            TargetSpec::Template(template) => render(template, ctx.params)?,
            TargetSpec::QueryParam {
                param,
                into,
                template,
            } => {
                let value = ctx
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == param)
                    .map(|(_, v)| v.into_owned())
                    .filter(|v| !v.is_empty())
                    .ok_or(SkipReason::MissingParameter)?;
                let mut params = ctx.params.clone();
                params.insert(into.as_str(), value);
                render(template, &params)?
            }
            TargetSpec::PathRewrite {
                pattern,
                replacement,
            } => {
                let path = ctx.url.path();
                if !pattern.is_match(path) {
                    return Err(SkipReason::EmptyTarget);
                }
                pattern.replace(path, replacement.as_str()).into_owned()
            }
            TargetSpec::AppendQuery { query, template } => {
                let base = match template {
                    Some(template) => render(template, ctx.params)?,
                    None => match ctx.url.query() {
                        Some(existing) => format!("{}?{}", ctx.url.path(), existing),
                        None => ctx.url.path().to_string(),
                    },
                };
                let separator = if base.contains('?') { '&' } else { '?' };
                format!("{base}{separator}{query}")
            }
            TargetSpec::Document {
                selector,
                attribute,
                capture,
                into,
                template,
            } => {
                let document = ctx.document.ok_or(SkipReason::DocumentRequired)?;
                let element = document
                    .select(selector)
                    .next()
                    .ok_or(SkipReason::EmptyTarget)?;
                let raw = match attribute {
                    Some(name) => element
                        .value()
                        .attr(name)
                        .ok_or(SkipReason::EmptyTarget)?
                        .to_string(),
                    None => element.text().collect::<String>(),
                };
                let raw = raw.trim();
                let value = match capture {
                    Some(re) => re
                        .captures(raw)
                        .and_then(|caps| caps.get(1))
                        .map(|m| m.as_str())
                        .ok_or(SkipReason::EmptyTarget)?,
                    None => raw,
                };
                if value.is_empty() {
                    return Err(SkipReason::EmptyTarget);
                }
                let mut params = ctx.params.clone();
                params.insert(into.as_str(), value);
                render(template, &params)?
            }
            TargetSpec::Callback(name) => callbacks.run_target(name, ctx)?,
        };

        if target.trim().is_empty() {
            return Err(SkipReason::EmptyTarget);
        }
        Ok(target)
    }
}

fn render(template: &str, params: &MatchParams) -> Result<String, SkipReason> {
    render_template(template, params).ok_or(SkipReason::MissingParameter)
}

/// Optional per-rule guard evaluated against the route parameters.
#[derive(Debug, Clone)]
pub enum Verification {
    /// The parameter must exist and match the regex.
    ParamPattern {
        /// Route parameter to check
        param: String,
        /// Regex the value must match
        pattern: Regex,
    },
    /// Host-registered verification callback.
    Callback(String),
}

impl Verification {
    /// Returns `true` when the rule may contribute for `params`.
    pub fn verify(&self, params: &MatchParams, callbacks: &CallbackRegistry) -> bool {
        match self {
            Verification::ParamPattern { param, pattern } => params
                .get(param)
                .map(|value| pattern.is_match(value))
                .unwrap_or(false),
            Verification::Callback(name) => callbacks.run_verification(name, params),
        }
    }
}

/// Serialized `target` field: a template string or a typed object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTarget {
    Template(String),
    Typed(RawTypedTarget),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum RawTypedTarget {
    QueryParam {
        param: String,
        #[serde(rename = "as", default)]
        into: Option<String>,
        template: String,
    },
    PathRewrite {
        pattern: String,
        replacement: String,
    },
    AppendQuery {
        query: String,
        #[serde(default)]
        template: Option<String>,
    },
    Document {
        selector: String,
        #[serde(default)]
        attribute: Option<String>,
        #[serde(default)]
        capture: Option<String>,
        #[serde(rename = "as", default)]
        into: Option<String>,
        template: String,
    },
    Callback {
        name: String,
    },
}

/// Serialized `verification` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawVerification {
    ParamPattern { param: String, pattern: String },
    Callback { callback: String },
}

fn compile_regex(pattern: &str) -> Result<Regex, CatalogError> {
    Regex::new(pattern).map_err(|source| CatalogError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

impl RawTarget {
    pub(crate) fn compile(self) -> Result<TargetSpec, CatalogError> {
        let typed = match self {
            RawTarget::Template(template) => return Ok(TargetSpec::Template(template)),
            RawTarget::Typed(typed) => typed,
        };

        Ok(match typed {
            RawTypedTarget::QueryParam {
                param,
                into,
                template,
            } => TargetSpec::QueryParam {
                into: into.unwrap_or_else(|| param.clone()),
                param,
                template,
            },
            RawTypedTarget::PathRewrite {
                pattern,
                replacement,
            } => TargetSpec::PathRewrite {
                pattern: compile_regex(&pattern)?,
                replacement,
            },
            RawTypedTarget::AppendQuery { query, template } => TargetSpec::AppendQuery {
                query: query.trim_start_matches(['?', '&']).to_string(),
                template,
            },
            RawTypedTarget::Document {
                selector,
                attribute,
                capture,
                into,
                template,
            } => TargetSpec::Document {
                selector: parse_selector(&selector)?,
                attribute,
                capture: capture.as_deref().map(compile_regex).transpose()?,
                into: into.unwrap_or_else(|| DEFAULT_DOCUMENT_PARAM.to_string()),
                template,
            },
            RawTypedTarget::Callback { name } => TargetSpec::Callback(name),
        })
    }
}

impl RawVerification {
    pub(crate) fn compile(self) -> Result<Verification, CatalogError> {
        Ok(match self {
            RawVerification::ParamPattern { param, pattern } => Verification::ParamPattern {
                param,
                pattern: compile_regex(&pattern)?,
            },
            RawVerification::Callback { callback } => Verification::Callback(callback),
        })
    }
}
