//! Command-line application helpers.
//!
//! This module provides URL validation and result rendering used by the
//! `feed_radar` binary.

pub mod output;
pub mod url;

// Re-export public API
pub use output::{render_plain, render_result};
pub use url::validate_and_normalize_url;
