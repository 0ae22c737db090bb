//! Host-registered callbacks for targets and verifications.
//!
//! Catalog rules refer to callbacks by name. The host application registers the
//! implementations in a [`CallbackRegistry`] and hands it to the analyzer. This
//! is the only place rule resolution can run arbitrary code, and every call goes
//! through [`CallbackRegistry::run_target`] / [`CallbackRegistry::run_verification`],
//! which turn errors and panics into "no result".

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::error_handling::SkipReason;
use crate::router::MatchParams;

/// Inputs available to a target while it resolves.
#[derive(Clone, Copy)]
pub struct TargetContext<'a> {
    /// Parameters extracted from the page path
    pub params: &'a MatchParams,
    /// The page URL
    pub url: &'a Url,
    /// The parsed page, only present in the HTML pass
    pub document: Option<&'a Html>,
}

/// A named target implementation.
pub trait TargetCallback: Send + Sync {
    /// Whether the callback reads the document. Such callbacks are skipped
    /// until HTML is available.
    fn requires_document(&self) -> bool {
        false
    }

    /// Computes the raw target string, or `None` when the page has no feed.
    fn resolve(&self, ctx: &TargetContext<'_>) -> anyhow::Result<Option<String>>;
}

/// A named verification implementation.
pub trait VerificationCallback: Send + Sync {
    /// Returns `true` when the rule may contribute.
    fn verify(&self, params: &MatchParams) -> bool;
}

impl<F> VerificationCallback for F
where
    F: Fn(&MatchParams) -> bool + Send + Sync,
{
    fn verify(&self, params: &MatchParams) -> bool {
        self(params)
    }
}

struct FnTarget<F> {
    requires_document: bool,
    f: F,
}

impl<F> TargetCallback for FnTarget<F>
where
    F: Fn(&TargetContext<'_>) -> anyhow::Result<Option<String>> + Send + Sync,
{
    fn requires_document(&self) -> bool {
        self.requires_document
    }

    fn resolve(&self, ctx: &TargetContext<'_>) -> anyhow::Result<Option<String>> {
        (self.f)(ctx)
    }
}

/// Name → implementation lookup for catalog callbacks.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    targets: HashMap<String, Arc<dyn TargetCallback>>,
    verifications: HashMap<String, Arc<dyn VerificationCallback>>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target implementation, replacing any previous one with the same name.
    pub fn register_target(&mut self, name: impl Into<String>, callback: Arc<dyn TargetCallback>) {
        self.targets.insert(name.into(), callback);
    }

    /// Registers a closure as a target implementation.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, requires_document: bool, f: F)
    where
        F: Fn(&TargetContext<'_>) -> anyhow::Result<Option<String>> + Send + Sync + 'static,
    {
        self.register_target(
            name,
            Arc::new(FnTarget {
                requires_document,
                f,
            }),
        );
    }

    /// Registers a verification implementation.
    pub fn register_verification<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&MatchParams) -> bool + Send + Sync + 'static,
    {
        self.verifications.insert(name.into(), Arc::new(f));
    }

    /// Whether a target callback is registered under `name`.
    pub fn has_target(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Whether a verification callback is registered under `name`.
    pub fn has_verification(&self, name: &str) -> bool {
        self.verifications.contains_key(name)
    }

    /// Whether the named target needs the document. Unknown names report `false`
    /// so that they are reported as unknown rather than postponed.
    pub fn target_requires_document(&self, name: &str) -> bool {
        self.targets
            .get(name)
            .map(|cb| cb.requires_document())
            .unwrap_or(false)
    }

    /// Runs a named target callback.
    pub(crate) fn run_target(
        &self,
        name: &str,
        ctx: &TargetContext<'_>,
    ) -> Result<String, SkipReason> {
        let callback = self.targets.get(name).ok_or_else(|| {
            log::warn!("Rule references unregistered target callback '{}'", name);
            SkipReason::UnknownCallback
        })?;

        if callback.requires_document() && ctx.document.is_none() {
            return Err(SkipReason::DocumentRequired);
        }

        match catch_unwind(AssertUnwindSafe(|| callback.resolve(ctx))) {
            Ok(Ok(Some(target))) => Ok(target),
            Ok(Ok(None)) => Err(SkipReason::EmptyTarget),
            Ok(Err(e)) => {
                log::debug!("Target callback '{}' failed for {}: {:#}", name, ctx.url, e);
                Err(SkipReason::CallbackFailed)
            }
            Err(_) => {
                log::warn!("Target callback '{}' panicked for {}", name, ctx.url);
                Err(SkipReason::CallbackFailed)
            }
        }
    }

    /// Runs a named verification callback. Unknown names and panics reject.
    pub(crate) fn run_verification(&self, name: &str, params: &MatchParams) -> bool {
        let Some(callback) = self.verifications.get(name) else {
            log::warn!("Rule references unregistered verification callback '{}'", name);
            return false;
        };

        catch_unwind(AssertUnwindSafe(|| callback.verify(params))).unwrap_or_else(|_| {
            log::warn!("Verification callback '{}' panicked", name);
            false
        })
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut targets: Vec<&String> = self.targets.keys().collect();
        targets.sort();
        let mut verifications: Vec<&String> = self.verifications.keys().collect();
        verifications.sort();
        f.debug_struct("CallbackRegistry")
            .field("targets", &targets)
            .field("verifications", &verifications)
            .finish()
    }
}
