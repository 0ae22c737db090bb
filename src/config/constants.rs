//! Configuration constants.
//!
//! Reserved catalog keys, subdomain fallback sets and limits shared across
//! the catalog, the target resolver and the CLI.

/// Source patterns used when a rule does not declare any.
///
/// `"/"` covers the root page and `"/*"` covers every deeper path.
pub const DEFAULT_SOURCES: &[&str] = &["/", "/*"];

/// Subdomain selector meaning "no subdomain".
pub const APEX_SELECTOR: &str = ".";

/// Catalog keys starting with this prefix carry domain metadata, never rules.
pub const RESERVED_KEY_PREFIX: &str = "_";

/// Metadata key holding a domain's display name.
pub const DISPLAY_NAME_KEY: &str = "_name";

/// Subdomains that fall back to the apex selector when they have no rules of their own.
pub const APEX_FALLBACK_SUBDOMAINS: &[&str] = &["www", "mobile", "m"];

/// Selector tried when the page host has no subdomain at all.
pub const EMPTY_SUBDOMAIN_FALLBACK: &str = "www";

/// Default icon location, relative to the page origin.
pub const FAVICON_PATH: &str = "/favicon.ico";

/// Maximum URL length (2048 characters) accepted by the CLI.
/// This matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Placeholder name used for an unnamed trailing wildcard (`/*`).
pub const WILDCARD_PARAM: &str = "*";

/// Parameter name used by `document` targets when no `as` is given.
pub const DEFAULT_DOCUMENT_PARAM: &str = "value";
