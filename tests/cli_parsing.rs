// CLI argument parsing tests.

use clap::Parser;
use feed_radar::{LogFormat, LogLevel, Opt, OutputFormat};

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["feed_radar", "example.com", "--rules", "rules.json"])
        .expect("Failed to parse minimal args");

    assert_eq!(opt.url, "example.com");
    assert_eq!(opt.rules.to_str(), Some("rules.json"));
    assert!(opt.html.is_none());
    assert!(opt.aggregator_base.is_none());
    assert_eq!(opt.format, OutputFormat::Plain);
    assert!(!opt.include_site_name);
    assert!(!opt.no_anchors);
    assert!(matches!(opt.log_level, LogLevel::Warn));
    assert!(matches!(opt.log_format, LogFormat::Plain));

    let config = opt.analyzer_config();
    assert!(config.scan_html);
    assert!(config.anchor_heuristics);
    assert!(!config.include_site_name);
}

#[test]
fn test_all_flags() {
    let opt = Opt::try_parse_from([
        "feed_radar",
        "https://github.com/alice",
        "--rules",
        "rules/",
        "--html",
        "page.html",
        "--aggregator-base",
        "https://rsshub.app",
        "--format",
        "json",
        "--include-site-name",
        "--no-anchors",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("Failed to parse args");

    assert_eq!(opt.html.as_deref().and_then(|p| p.to_str()), Some("page.html"));
    assert_eq!(opt.aggregator_base.as_deref(), Some("https://rsshub.app"));
    assert_eq!(opt.format, OutputFormat::Json);
    assert!(matches!(opt.log_level, LogLevel::Debug));
    assert!(matches!(opt.log_format, LogFormat::Json));

    let config = opt.analyzer_config();
    assert!(config.include_site_name);
    assert!(!config.anchor_heuristics);
}

#[test]
fn test_missing_rules_is_an_error() {
    assert!(Opt::try_parse_from(["feed_radar", "example.com"]).is_err());
}

#[test]
fn test_missing_url_is_an_error() {
    assert!(Opt::try_parse_from(["feed_radar", "--rules", "rules.json"]).is_err());
}

#[test]
fn test_invalid_format_is_an_error() {
    let result = Opt::try_parse_from([
        "feed_radar",
        "example.com",
        "--rules",
        "rules.json",
        "--format",
        "xml",
    ]);
    assert!(result.is_err());
}
