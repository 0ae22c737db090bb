//! Error handling and skip statistics.
//!
//! This module provides:
//! - Error type definitions for analysis, catalog decoding and initialization
//! - Skip reasons for rule instances that matched but produced nothing
//! - Thread-safe skip statistics
//!
//! Only structural failures (unusable URL, malformed catalog) are errors.
//! Per-rule failures are categorized as [`SkipReason`]s and swallowed.

mod stats;
mod types;

pub use stats::SkipStats;
pub use types::{AnalysisError, CatalogError, InitializationError, SkipReason};
