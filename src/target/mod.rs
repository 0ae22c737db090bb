//! Target resolution.
//!
//! Turns a matched rule plus its route parameters into a concrete feed URL or an
//! aggregator path. Resolution of one rule instance is fully local: every
//! failure is reported as a [`SkipReason`] and never affects sibling rules.

mod callbacks;
mod spec;
mod template;

use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::catalog::Rule;
use crate::error_handling::SkipReason;

pub use callbacks::{CallbackRegistry, TargetCallback, TargetContext, VerificationCallback};
pub(crate) use spec::{RawTarget, RawVerification};
pub use spec::{TargetSpec, Verification};
pub use template::render_template;

/// How a resolved target string is turned into an output entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
pub enum TargetKind {
    /// The target is an absolute feed URL.
    Url,
    /// The target is a path on the page's own origin.
    PathForOriginal,
    /// The target is a path for an external aggregator service.
    #[default]
    #[serde(alias = "rsshub")]
    AggregatorPath,
}

/// The output of resolving one rule instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A concrete feed URL (certain).
    FeedUrl(String),
    /// A path needing a caller-supplied aggregator base URL.
    AggregatorPath(String),
}

/// Resolves a matched rule.
///
/// Verification runs first; a rejected rule never runs its target.
///
/// # Errors
///
/// Returns why the rule instance contributes nothing.
pub fn resolve_target(
    rule: &Rule,
    ctx: &TargetContext<'_>,
    callbacks: &CallbackRegistry,
) -> Result<ResolvedTarget, SkipReason> {
    if let Some(verification) = &rule.verification {
        if !verification.verify(ctx.params, callbacks) {
            return Err(SkipReason::VerificationRejected);
        }
    }

    if ctx.document.is_none() && rule.target.requires_document(callbacks) {
        return Err(SkipReason::DocumentRequired);
    }

    let raw = rule.target.resolve(ctx, callbacks)?;

    Ok(match rule.target_kind {
        TargetKind::Url => ResolvedTarget::FeedUrl(raw),
        TargetKind::PathForOriginal => ResolvedTarget::FeedUrl(join_origin(ctx.url, &raw)),
        TargetKind::AggregatorPath => ResolvedTarget::AggregatorPath(raw),
    })
}

/// Joins a path onto the origin of `url`. Absolute http(s) targets pass through.
fn join_origin(url: &url::Url, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    let origin = url.origin().ascii_serialization();
    if target.starts_with('/') {
        format!("{origin}{target}")
    } else {
        format!("{origin}/{target}")
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
