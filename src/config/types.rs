//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and for configuring an [`crate::Analyzer`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the CLI prints the discovered feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One feed per line
    Plain,
    /// Tagged JSON entry list
    Json,
}

/// Analyzer configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use feed_radar::AnalyzerConfig;
///
/// let config = AnalyzerConfig {
///     include_site_name: true,
///     ..Default::default()
/// };
/// assert!(config.scan_html);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Prefix rule-based feed titles with the domain's display name
    pub include_site_name: bool,

    /// Run the HTML feed scanner when HTML is supplied
    pub scan_html: bool,

    /// Include anchor-based (uncertain) candidates in the HTML scan
    pub anchor_heuristics: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            include_site_name: false,
            scan_html: true,
            anchor_heuristics: true,
        }
    }
}

/// Command-line options for the `feed_radar` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "feed_radar",
    about = "Discover RSS/Atom feeds for a page from domain rules and HTML markup"
)]
pub struct Opt {
    /// Page URL to analyze (https:// is assumed when the scheme is missing)
    pub url: String,

    /// Rule catalog: a JSON file or a directory of JSON files
    #[arg(long)]
    pub rules: PathBuf,

    /// Saved HTML of the page, enables the document pass
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Base URL prepended to aggregator paths in the output
    #[arg(long)]
    pub aggregator_base: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Prefix rule titles with the site's display name
    #[arg(long)]
    pub include_site_name: bool,

    /// Skip anchor heuristics in the HTML scan
    #[arg(long)]
    pub no_anchors: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the analyzer configuration selected on the command line.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            include_site_name: self.include_site_name,
            anchor_heuristics: !self.no_anchors,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_analyzer_config_default() {
        let config = AnalyzerConfig::default();
        assert!(!config.include_site_name);
        assert!(config.scan_html);
        assert!(config.anchor_heuristics);
    }

    #[test]
    fn test_opt_maps_to_analyzer_config() {
        let opt = Opt::try_parse_from([
            "feed_radar",
            "https://example.com",
            "--rules",
            "rules.json",
            "--include-site-name",
            "--no-anchors",
        ])
        .expect("Should parse");
        let config = opt.analyzer_config();
        assert!(config.include_site_name);
        assert!(!config.anchor_heuristics);
        assert!(config.scan_html);
    }
}
