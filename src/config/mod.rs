//! Application configuration and constants.
//!
//! This module provides:
//! - Constants shared by the catalog, resolver and scanner
//! - Analyzer configuration
//! - CLI option types and parsing

mod constants;
mod types;

pub use constants::*;
pub use types::{AnalyzerConfig, LogFormat, LogLevel, Opt, OutputFormat};
