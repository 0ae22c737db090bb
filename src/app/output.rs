//! Rendering of analysis results for the command line.

use crate::config::OutputFormat;
use crate::models::{AnalysisResult, DetectedFeed};

/// Renders a result in the requested format.
///
/// `aggregator_base` turns aggregator paths into full URLs in plain output;
/// JSON output always carries the raw tagged entries.
pub fn render_result(
    result: &AnalysisResult,
    format: OutputFormat,
    aggregator_base: Option<&str>,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(result, aggregator_base)),
        OutputFormat::Json => serde_json::to_string_pretty(&result.entries()),
    }
}

/// One line per feed: `[rss]`, `[rss?]` (uncertain) or `[path]`, then title and target.
pub fn render_plain(result: &AnalysisResult, aggregator_base: Option<&str>) -> String {
    if result.is_empty() {
        return "No feeds found".to_string();
    }

    let mut lines = Vec::with_capacity(result.len());
    for entry in result.entries() {
        let line = match entry {
            DetectedFeed::Rss(feed) => {
                let marker = if feed.is_certain { "[rss] " } else { "[rss?]" };
                format!("{} {} - {}", marker, feed.title, feed.url)
            }
            DetectedFeed::Aggregator(feed) => {
                let target = match aggregator_base {
                    Some(base) => feed.url_with_base(base),
                    None => feed.path.clone(),
                };
                match &feed.docs_url {
                    Some(docs) => format!("[path] {} - {} (docs: {})", feed.title, target, docs),
                    None => format!("[path] {} - {}", feed.title, target),
                }
            }
        };
        lines.push(line);
    }
    lines.join("\n")
}
