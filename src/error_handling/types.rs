//! Error type definitions.
//!
//! This module defines the errors that propagate to callers and the reasons a
//! single rule instance can be skipped during analysis.

use log::SetLoggerError;
use strum_macros::{AsRefStr, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the logger with custom message.
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),
}

/// Errors that end an analysis call.
///
/// Everything else (missing coverage, per-rule failures) is expressed as an
/// empty contribution rather than an error.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input could not be parsed as an absolute URL.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but has no host to look rules up for.
    #[error("URL '{0}' has no host component")]
    NoHost(String),
}

/// Structural problems found while decoding a rule catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog is not valid JSON or does not have the expected shape.
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A domain key is empty or its value is not an object.
    #[error("invalid domain entry '{domain}': {reason}")]
    InvalidDomain {
        /// Domain key as written
        domain: String,
        /// What is wrong with it
        reason: String,
    },

    /// A subdomain selector does not map to a rule list.
    #[error("invalid selector '{selector}' in domain '{domain}': {reason}")]
    InvalidSelector {
        /// Owning domain
        domain: String,
        /// Subdomain selector key
        selector: String,
        /// What is wrong with it
        reason: String,
    },

    /// A rule is missing required fields or has fields of the wrong type.
    #[error("invalid rule #{index} for '{selector}' in domain '{domain}': {reason}")]
    InvalidRule {
        /// Owning domain
        domain: String,
        /// Subdomain selector the rule is listed under
        selector: String,
        /// Position of the rule in its list
        index: usize,
        /// Decoding or compilation error
        reason: String,
    },

    /// A source route pattern could not be parsed.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern as written
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// A CSS selector inside a document target did not parse.
    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidCssSelector {
        /// Selector as written
        selector: String,
        /// Parser message
        reason: String,
    },

    /// A regular expression inside a target or verification did not compile.
    #[error("invalid regex '{pattern}': {source}")]
    InvalidRegex {
        /// Regex as written
        pattern: String,
        /// Compiler error
        #[source]
        source: regex::Error,
    },
}

/// Why a matched rule instance contributed nothing.
///
/// Route mismatches are not listed: an unmatched rule was never a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, AsRefStr)]
pub enum SkipReason {
    /// A required template placeholder had no parameter value.
    MissingParameter,
    /// The rule's verification returned false.
    VerificationRejected,
    /// A callback returned an error or panicked.
    CallbackFailed,
    /// The catalog references a callback that was never registered.
    UnknownCallback,
    /// The target reads the document but no HTML was supplied.
    DocumentRequired,
    /// The target resolved to an empty string or could not be applied.
    EmptyTarget,
}
