//! Application initialization.
//!
//! Logger set-up for the `feed_radar` binary. The library itself never installs
//! a logger.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
