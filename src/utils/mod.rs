//! Shared utilities.
//!
//! This module provides CSS selector parsing for static selectors and for
//! selectors read from catalog data.

mod selector;

pub use selector::{parse_selector, parse_selector_unsafe};

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
