//! Hostname splitting using the Public Suffix List.
//!
//! This module splits a hostname into its registrable domain and the subdomain
//! labels in front of it, using the compiled-in Public Suffix List (PSL).
//!
//! Key functions:
//! - `split_host()` - Splits a hostname into `HostParts`
//! - `split_url_host()` - Same, starting from a parsed URL

use psl::Psl;

use crate::config::APEX_SELECTOR;

/// A hostname split at its registrable domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostParts {
    /// Registrable domain (e.g., "github.com" for "gist.github.com")
    pub domain: String,
    /// Labels left of the registrable domain, or empty for apex hosts
    pub subdomain: String,
}

impl HostParts {
    /// Returns the catalog selector for this host: `"."` for apex hosts.
    pub fn selector(&self) -> &str {
        if self.subdomain.is_empty() {
            APEX_SELECTOR
        } else {
            &self.subdomain
        }
    }

    /// Reassembles the full hostname.
    pub fn host(&self) -> String {
        if self.subdomain.is_empty() {
            self.domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.domain)
        }
    }
}

/// Splits a hostname into registrable domain and subdomain.
///
/// # Arguments
///
/// * `host` - The hostname (case-insensitive, an optional trailing dot is ignored)
///
/// # Returns
///
/// `None` for IP literals and for hosts whose suffix is not a known PSL entry
/// (e.g., "localhost"). Callers treat that as "no rules applicable".
pub fn split_host(host: &str) -> Option<HostParts> {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() || is_ip_literal(&host) {
        return None;
    }

    let domain = psl::List.domain(host.as_bytes())?;
    if !domain.suffix().is_known() {
        log::debug!("Host '{}' has no known public suffix", host);
        return None;
    }

    let domain = std::str::from_utf8(domain.as_bytes()).ok()?.to_string();
    let subdomain = host
        .strip_suffix(domain.as_str())
        .map(|prefix| prefix.trim_end_matches('.').to_string())
        .unwrap_or_default();

    Some(HostParts { domain, subdomain })
}

/// Splits the host of a parsed URL.
///
/// Returns `None` when the URL has no host or the host is not a domain name.
pub fn split_url_host(url: &url::Url) -> Option<HostParts> {
    match url.host()? {
        url::Host::Domain(host) => split_host(host),
        url::Host::Ipv4(_) | url::Host::Ipv6(_) => None,
    }
}

fn is_ip_literal(host: &str) -> bool {
    let unbracketed = host.trim_start_matches('[').trim_end_matches(']');
    host.parse::<std::net::Ipv4Addr>().is_ok() || unbracketed.parse::<std::net::Ipv6Addr>().is_ok()
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
