//! Skip statistics tracking.
//!
//! Thread-safe counters for rule instances that matched a page but contributed
//! no feed. The analyzer never owns one of these; callers pass a tracker into
//! [`crate::Analyzer::analyze_with_stats`] when they want the numbers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::SkipReason;

/// Thread-safe skip statistics tracker.
///
/// All reasons are initialized to zero on creation, so the struct can be shared
/// across threads behind an `Arc` without further locking.
pub struct SkipStats {
    skips: HashMap<SkipReason, AtomicUsize>,
}

impl SkipStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        let mut skips = HashMap::new();
        for reason in SkipReason::iter() {
            skips.insert(reason, AtomicUsize::new(0));
        }
        SkipStats { skips }
    }

    /// Increment a skip counter.
    pub fn increment(&self, reason: SkipReason) {
        if let Some(counter) = self.skips.get(&reason) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment skip counter for {:?} which is not in the map. \
                 This indicates a bug in SkipStats initialization.",
                reason
            );
        }
    }

    /// Get the count for a skip reason.
    pub fn get_count(&self, reason: SkipReason) -> usize {
        self.skips
            .get(&reason)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total skip count across all reasons.
    pub fn total(&self) -> usize {
        SkipReason::iter().map(|r| self.get_count(r)).sum()
    }

    /// Logs non-zero counters at debug level.
    pub fn log_summary(&self) {
        for reason in SkipReason::iter() {
            let count = self.get_count(reason);
            if count > 0 {
                log::debug!("Skipped rule instances ({}): {}", reason.as_ref(), count);
            }
        }
    }
}

impl Default for SkipStats {
    fn default() -> Self {
        Self::new()
    }
}
