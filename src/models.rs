//! Output entities and the result aggregator.
//!
//! An analysis pass yields an [`AnalysisResult`]; passes are never mutated,
//! they are folded with [`AnalysisResult::combine`].

use serde::{Deserialize, Serialize};

/// A resolved feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RssFeed {
    /// Display title
    pub title: String,
    /// Absolute feed URL
    pub url: String,
    /// Page icon URL
    pub image: String,
    /// `false` for heuristic anchor matches
    pub is_certain: bool,
}

/// A path that needs an aggregator base URL chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorFeed {
    /// Display title
    pub title: String,
    /// Aggregator path, e.g. `/github/release/alice/proj`
    pub path: String,
    /// Documentation for the route, when the catalog provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
}

impl AggregatorFeed {
    /// Joins `base` and the path with exactly one `/` between them.
    ///
    /// ```
    /// use feed_radar::AggregatorFeed;
    ///
    /// let feed = AggregatorFeed {
    ///     title: "Releases".to_string(),
    ///     path: "/github/release/alice/proj".to_string(),
    ///     docs_url: None,
    /// };
    /// assert_eq!(
    ///     feed.url_with_base("https://rsshub.app/"),
    ///     "https://rsshub.app/github/release/alice/proj"
    /// );
    /// ```
    pub fn url_with_base(&self, base: &str) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// One output entry, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DetectedFeed {
    /// A concrete feed URL
    Rss(RssFeed),
    /// An aggregator path
    Aggregator(AggregatorFeed),
}

impl DetectedFeed {
    /// Title of either shape.
    pub fn title(&self) -> &str {
        match self {
            DetectedFeed::Rss(feed) => &feed.title,
            DetectedFeed::Aggregator(feed) => &feed.title,
        }
    }
}

impl From<RssFeed> for DetectedFeed {
    fn from(feed: RssFeed) -> Self {
        DetectedFeed::Rss(feed)
    }
}

impl From<AggregatorFeed> for DetectedFeed {
    fn from(feed: AggregatorFeed) -> Self {
        DetectedFeed::Aggregator(feed)
    }
}

/// The feeds found by one analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Resolved feeds, rule-based first, then HTML-scanned
    pub rss_feeds: Vec<RssFeed>,
    /// Aggregator paths
    pub aggregator_feeds: Vec<AggregatorFeed>,
}

impl AnalysisResult {
    /// Creates a result from its two lists.
    pub fn new(rss_feeds: Vec<RssFeed>, aggregator_feeds: Vec<AggregatorFeed>) -> Self {
        Self {
            rss_feeds,
            aggregator_feeds,
        }
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.rss_feeds.len() + self.aggregator_feeds.len()
    }

    /// `true` when neither list has entries.
    pub fn is_empty(&self) -> bool {
        self.rss_feeds.is_empty() && self.aggregator_feeds.is_empty()
    }

    /// Merges two passes field by field: each list is taken from whichever side
    /// has more entries, and `previous` wins ties.
    ///
    /// A later pass that finds fewer feeds (for example because the page fetch
    /// failed) therefore never drops what an earlier pass found.
    pub fn combine(previous: AnalysisResult, next: AnalysisResult) -> AnalysisResult {
        let rss_feeds = if next.rss_feeds.len() > previous.rss_feeds.len() {
            next.rss_feeds
        } else {
            previous.rss_feeds
        };
        let aggregator_feeds = if next.aggregator_feeds.len() > previous.aggregator_feeds.len() {
            next.aggregator_feeds
        } else {
            previous.aggregator_feeds
        };
        AnalysisResult {
            rss_feeds,
            aggregator_feeds,
        }
    }

    /// Folds a sequence of passes, oldest first, with [`AnalysisResult::combine`].
    pub fn refine<I>(passes: I) -> AnalysisResult
    where
        I: IntoIterator<Item = AnalysisResult>,
    {
        passes
            .into_iter()
            .fold(AnalysisResult::default(), AnalysisResult::combine)
    }

    /// All entries as tagged values, resolved feeds first.
    pub fn entries(&self) -> Vec<DetectedFeed> {
        self.rss_feeds
            .iter()
            .cloned()
            .map(DetectedFeed::from)
            .chain(self.aggregator_feeds.iter().cloned().map(DetectedFeed::from))
            .collect()
    }
}
