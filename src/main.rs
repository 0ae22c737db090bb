//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `feed_radar` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading the rule catalog and the optional saved HTML
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use std::sync::Arc;

use feed_radar::initialization::init_logger_with;
use feed_radar::{
    load_catalog, render_result, validate_and_normalize_url, AnalysisResult, Analyzer, Opt,
    SkipStats,
};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(opt).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            eprintln!("feed_radar error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(opt: Opt) -> Result<String> {
    let url = validate_and_normalize_url(&opt.url)
        .with_context(|| format!("Unusable URL: {}", opt.url))?;

    let catalog = load_catalog(&opt.rules)
        .await
        .with_context(|| format!("Failed to load rules from {}", opt.rules.display()))?;
    log::info!(
        "Loaded {} domains ({} rules) from {}",
        catalog.len(),
        catalog.rule_count(),
        opt.rules.display()
    );

    let html = match &opt.html {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read HTML from {}", path.display()))?,
        ),
        None => None,
    };

    let analyzer = Analyzer::new(Arc::new(catalog)).with_config(opt.analyzer_config());
    let stats = SkipStats::new();

    // Pass 1 uses the URL only; pass 2 adds the page HTML when we have it.
    let mut passes = vec![analyzer.analyze_with_stats(&url, None, &stats)?];
    if let Some(html) = html.as_deref() {
        passes.push(analyzer.analyze_with_stats(&url, Some(html), &stats)?);
    }
    let result = AnalysisResult::refine(passes);
    stats.log_summary();

    render_result(&result, opt.format, opt.aggregator_base.as_deref())
        .context("Failed to render result")
}
