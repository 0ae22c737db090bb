//! Analysis entry point.
//!
//! One call runs the whole pipeline for a page:
//! URL → registrable domain / subdomain → catalog rules → route matches →
//! resolved targets, then (when HTML is given) the markup scan. Rule-based
//! feeds come first; the two channels are concatenated, not deduplicated
//! against each other.

use scraper::Html;
use std::sync::Arc;
use url::Url;

use crate::catalog::{Rule, RuleCatalog};
use crate::config::AnalyzerConfig;
use crate::domain::{split_url_host, HostParts};
use crate::error_handling::{AnalysisError, SkipStats};
use crate::models::{AggregatorFeed, AnalysisResult, RssFeed};
use crate::parse::{page_icon_url, scan_document};
use crate::router::Router;
use crate::target::{resolve_target, CallbackRegistry, ResolvedTarget, TargetContext};

/// Feed discovery engine bound to one catalog snapshot.
///
/// The analyzer holds no mutable state: the same inputs always give the same
/// result. To pick up a new catalog, build a new analyzer from a fresh
/// [`crate::CatalogStore::snapshot`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use feed_radar::{Analyzer, RuleCatalog};
///
/// let catalog = RuleCatalog::from_json_str(r#"{
///     "github.com": { ".": [{
///         "title": "Releases",
///         "source": "/:user/:repo/releases",
///         "targetType": "pathForOriginal",
///         "target": "/:user/:repo/releases.atom"
///     }] }
/// }"#).unwrap();
///
/// let analyzer = Analyzer::new(Arc::new(catalog));
/// let result = analyzer.analyze("https://github.com/alice/proj/releases", None).unwrap();
/// assert_eq!(result.rss_feeds[0].url, "https://github.com/alice/proj/releases.atom");
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    catalog: Arc<RuleCatalog>,
    callbacks: CallbackRegistry,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer with no callbacks and the default configuration.
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self {
            catalog,
            callbacks: CallbackRegistry::new(),
            config: AnalyzerConfig::default(),
        }
    }

    /// Sets the callbacks that catalog rules may reference by name.
    pub fn with_callbacks(mut self, callbacks: CallbackRegistry) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Sets the analyzer configuration.
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// The catalog snapshot this analyzer reads.
    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    /// Analyzes a page.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute page URL
    /// * `html` - The page's HTML, when it has been fetched
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidUrl` if `url` does not parse and
    /// `AnalysisError::NoHost` if it has no host. A host without rule coverage
    /// is not an error.
    pub fn analyze(&self, url: &str, html: Option<&str>) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_stats(url, html, &SkipStats::new())
    }

    /// Like [`Analyzer::analyze`], counting skipped rule instances in `stats`.
    pub fn analyze_with_stats(
        &self,
        url: &str,
        html: Option<&str>,
        stats: &SkipStats,
    ) -> Result<AnalysisResult, AnalysisError> {
        let page_url = parse_page_url(url)?;
        let document = html.map(Html::parse_document);

        let mut result = self.analyze_rules(&page_url, document.as_ref(), stats);

        if let (Some(document), true) = (document.as_ref(), self.config.scan_html) {
            result.rss_feeds.extend(scan_document(
                document,
                &page_url,
                self.config.anchor_heuristics,
            ));
        }

        log::debug!(
            "Analyzed {}: {} feeds, {} aggregator paths",
            page_url,
            result.rss_feeds.len(),
            result.aggregator_feeds.len()
        );
        Ok(result)
    }

    /// Runs only the rule-based channel for an already parsed URL.
    ///
    /// Hosts without a known public suffix (IP literals, `localhost`) and
    /// domains without catalog coverage give an empty result.
    pub fn analyze_rules(
        &self,
        page_url: &Url,
        document: Option<&Html>,
        stats: &SkipStats,
    ) -> AnalysisResult {
        let Some(host) = split_url_host(page_url) else {
            log::debug!("No registrable domain for {}", page_url);
            return AnalysisResult::default();
        };

        let rules = self.catalog.lookup(&host.domain, &host.subdomain);
        if rules.is_empty() {
            log::debug!(
                "No rules for {} (selector '{}')",
                host.domain,
                host.selector()
            );
            return AnalysisResult::default();
        }

        let mut router = Router::new();
        for (index, rule) in rules.iter().enumerate() {
            router.add(&rule.sources, index);
        }

        let image = page_icon_url(document, page_url);
        let mut result = AnalysisResult::default();

        for route in router.recognize(page_url.path()) {
            let rule = &rules[route.rule_index];
            let ctx = TargetContext {
                params: &route.params,
                url: page_url,
                document,
            };

            match resolve_target(rule, &ctx, &self.callbacks) {
                Ok(ResolvedTarget::FeedUrl(url)) => result.rss_feeds.push(RssFeed {
                    title: self.feed_title(&host, rule),
                    url,
                    image: image.clone(),
                    is_certain: true,
                }),
                Ok(ResolvedTarget::AggregatorPath(path)) => {
                    result.aggregator_feeds.push(AggregatorFeed {
                        title: self.feed_title(&host, rule),
                        path,
                        docs_url: rule.docs_url.clone(),
                    })
                }
                Err(reason) => {
                    log::debug!(
                        "Skipped rule '{}' ({}) for {}: {}",
                        rule.title,
                        route.pattern,
                        page_url,
                        reason.as_ref()
                    );
                    stats.increment(reason);
                }
            }
        }

        result
    }

    fn feed_title(&self, host: &HostParts, rule: &Rule) -> String {
        if !self.config.include_site_name {
            return rule.title.clone();
        }
        match self
            .catalog
            .domain(&host.domain)
            .and_then(|entry| entry.display_name.as_deref())
        {
            Some(name) if !name.is_empty() && !rule.title.is_empty() => {
                format!("{} {}", name, rule.title)
            }
            Some(name) if rule.title.is_empty() => name.to_string(),
            _ => rule.title.clone(),
        }
    }
}

fn parse_page_url(url: &str) -> Result<Url, AnalysisError> {
    let parsed = Url::parse(url.trim()).map_err(|source| AnalysisError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(AnalysisError::NoHost(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::SkipReason;

    const CATALOG: &str = r#"{
        "github.com": {
            "_name": "GitHub",
            ".": [
                {
                    "title": "仓库 Releases",
                    "docs": "https://docs.example/github",
                    "source": ["/:user/:repo/releases", "/:user/:repo/releases/*", "/:user/:repo/tags"],
                    "targetType": "pathForOriginal",
                    "target": "/:user/:repo/releases.atom"
                },
                {
                    "title": "仓库 Releases",
                    "source": ["/:user/:repo/releases", "/:user/:repo/tags"],
                    "target": "/github/release/:user/:repo"
                },
                {
                    "title": "用户仓库",
                    "source": "/:user",
                    "target": "/github/repos/:user"
                },
                {
                    "title": "Numeric issue",
                    "source": "/:user/:repo/issues/:id",
                    "target": "/github/issue/:user/:repo/:id",
                    "verification": { "param": "id", "pattern": "^\\d+$" }
                }
            ]
        },
        "example.com": {
            "www": [
                { "title": "Doc", "source": "/channel/:name", "target": { "type": "document", "selector": "meta[name=cid]", "attribute": "content", "as": "cid", "template": "/channel/:cid" } }
            ]
        }
    }"#;

    fn analyzer() -> Analyzer {
        let catalog = RuleCatalog::from_json_str(CATALOG).expect("catalog should decode");
        Analyzer::new(Arc::new(catalog))
    }

    #[test]
    fn test_releases_end_to_end() {
        let result = analyzer()
            .analyze("https://github.com/alice/proj/releases", None)
            .expect("analysis succeeds");

        assert_eq!(result.rss_feeds.len(), 1);
        let feed = &result.rss_feeds[0];
        assert_eq!(feed.title, "仓库 Releases");
        assert_eq!(feed.url, "https://github.com/alice/proj/releases.atom");
        assert_eq!(feed.image, "https://github.com/favicon.ico");
        assert!(feed.is_certain);

        assert_eq!(result.aggregator_feeds.len(), 1);
        assert_eq!(
            result.aggregator_feeds[0].path,
            "/github/release/alice/proj"
        );
        assert_eq!(result.aggregator_feeds[0].docs_url, None);
    }

    #[test]
    fn test_www_and_mobile_fall_back_to_apex() {
        let analyzer = analyzer();
        for url in [
            "https://www.github.com/alice",
            "https://m.github.com/alice/",
        ] {
            let result = analyzer.analyze(url, None).expect("analysis succeeds");
            assert_eq!(result.aggregator_feeds.len(), 1, "{url}");
            assert_eq!(result.aggregator_feeds[0].path, "/github/repos/alice");
        }
        let gist = analyzer
            .analyze("https://gist.github.com/alice", None)
            .expect("analysis succeeds");
        assert!(gist.is_empty());
    }

    #[test]
    fn test_verification_and_stats() {
        let analyzer = analyzer();
        let stats = SkipStats::new();

        let result = analyzer
            .analyze_with_stats("https://github.com/alice/proj/issues/abc", None, &stats)
            .expect("analysis succeeds");
        assert!(result.is_empty());
        assert_eq!(stats.get_count(SkipReason::VerificationRejected), 1);

        let result = analyzer
            .analyze_with_stats("https://github.com/alice/proj/issues/12", None, &stats)
            .expect("analysis succeeds");
        assert_eq!(
            result.aggregator_feeds[0].path,
            "/github/issue/alice/proj/12"
        );
        assert_eq!(stats.total(), 1);
    }

    #[test]
    fn test_document_rule_waits_for_html() {
        let analyzer = analyzer();
        let stats = SkipStats::new();

        let first = analyzer
            .analyze_with_stats("https://example.com/channel/news", None, &stats)
            .expect("analysis succeeds");
        assert!(first.is_empty());
        assert_eq!(stats.get_count(SkipReason::DocumentRequired), 1);

        let html = r#"<html><head>
            <meta name="cid" content="UC123">
            <link rel="alternate" type="application/rss+xml" href="/channel/news/feed" title="News">
        </head></html>"#;
        let second = analyzer
            .analyze("https://example.com/channel/news", Some(html))
            .expect("analysis succeeds");
        assert_eq!(second.aggregator_feeds[0].path, "/channel/UC123");
        assert_eq!(second.rss_feeds.len(), 1);
        assert_eq!(second.rss_feeds[0].url, "https://example.com/channel/news/feed");

        let refined = AnalysisResult::refine([first, second.clone()]);
        assert_eq!(refined, second);
    }

    #[test]
    fn test_rule_feeds_precede_scanned_feeds() {
        let html = r#"<html><head>
            <link rel="icon" href="/icon.png">
            <link type="application/atom+xml" href="https://github.com/alice/proj/releases.atom" title="Dup">
        </head></html>"#;
        let result = analyzer()
            .analyze("https://github.com/alice/proj/releases", Some(html))
            .expect("analysis succeeds");

        // No cross-channel dedupe: the same URL appears once per channel
        assert_eq!(result.rss_feeds.len(), 2);
        assert_eq!(result.rss_feeds[0].title, "仓库 Releases");
        assert_eq!(result.rss_feeds[0].image, "https://github.com/icon.png");
        assert_eq!(result.rss_feeds[1].title, "Dup");
    }

    #[test]
    fn test_scan_can_be_disabled() {
        let html = r#"<link type="application/rss+xml" href="/feed">"#;
        let config = AnalyzerConfig {
            scan_html: false,
            ..Default::default()
        };
        let result = analyzer()
            .with_config(config)
            .analyze("https://unknown.org/", Some(html))
            .expect("analysis succeeds");
        assert!(result.is_empty());
    }

    #[test]
    fn test_include_site_name() {
        let config = AnalyzerConfig {
            include_site_name: true,
            ..Default::default()
        };
        let result = analyzer()
            .with_config(config)
            .analyze("https://github.com/alice", None)
            .expect("analysis succeeds");
        assert_eq!(result.aggregator_feeds[0].title, "GitHub 用户仓库");
    }

    #[test]
    fn test_callbacks_are_used() {
        let catalog = RuleCatalog::from_json_str(
            r#"{ "example.org": { ".": [
                { "title": "Custom", "source": "/u/:id", "target": { "type": "callback", "name": "user" } },
                { "title": "Broken", "source": "/u/:id", "target": { "type": "callback", "name": "broken" } }
            ] } }"#,
        )
        .expect("catalog should decode");
        let mut callbacks = CallbackRegistry::new();
        callbacks.register_fn("user", false, |ctx| {
            Ok(ctx.params.get("id").map(|id| format!("/users/{id}")))
        });
        callbacks.register_fn("broken", false, |_| panic!("callback bug"));

        let stats = SkipStats::new();
        let result = Analyzer::new(Arc::new(catalog))
            .with_callbacks(callbacks)
            .analyze_with_stats("https://example.org/u/7", None, &stats)
            .expect("analysis succeeds");

        assert_eq!(result.aggregator_feeds.len(), 1);
        assert_eq!(result.aggregator_feeds[0].path, "/users/7");
        assert_eq!(stats.get_count(SkipReason::CallbackFailed), 1);
    }

    #[test]
    fn test_ip_and_unknown_hosts_have_no_rules() {
        let analyzer = analyzer();
        assert!(analyzer
            .analyze("http://127.0.0.1/alice", None)
            .expect("analysis succeeds")
            .is_empty());
        assert!(analyzer
            .analyze("http://localhost:8080/alice", None)
            .expect("analysis succeeds")
            .is_empty());
    }

    #[test]
    fn test_ip_host_still_scans_html() {
        let html = r#"<link type="application/rss+xml" href="/feed">"#;
        let result = analyzer()
            .analyze("http://127.0.0.1/", Some(html))
            .expect("analysis succeeds");
        assert_eq!(result.rss_feeds.len(), 1);
        assert_eq!(result.rss_feeds[0].url, "http://127.0.0.1/feed");
    }

    #[test]
    fn test_invalid_inputs() {
        let analyzer = analyzer();
        assert!(matches!(
            analyzer.analyze("not a url", None),
            Err(AnalysisError::InvalidUrl { .. })
        ));
        assert!(matches!(
            analyzer.analyze("mailto:someone@example.com", None),
            Err(AnalysisError::NoHost(_))
        ));
    }
}
