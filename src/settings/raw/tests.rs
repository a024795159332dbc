use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::{RawConfig, normalize_parallelism};
use crate::cli::CliArgs;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::parse_from(std::iter::once("fanout").chain(args.iter().copied()))
}

#[test]
fn cli_overrides_take_precedence() {
    let cli = parse(&[
        "--catalog",
        "/tmp/apps.json",
        "--dictionary",
        "/tmp/dict.json",
        "--parallelism",
        "8",
        "--min-partition",
        "32",
        "--timeout-ms",
        "150",
        "--limit",
        "10",
    ]);

    let mut config = RawConfig::default();
    config.search.max_parallelism = Some(2);
    config.search.limit = Some(99);
    config.apply_cli_overrides(&cli);

    assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/apps.json")));
    assert_eq!(config.expander.dictionary, Some(PathBuf::from("/tmp/dict.json")));
    assert_eq!(config.search.max_parallelism, Some(8));
    assert_eq!(config.search.limit, Some(10));
    assert_eq!(config.matcher.min_partition, Some(32));

    let resolved = config.resolve(&cli).unwrap();
    assert_eq!(resolved.max_parallelism, 8);
    assert_eq!(resolved.min_partition, 32);
    assert_eq!(resolved.timeout, Some(Duration::from_millis(150)));
    assert_eq!(resolved.limit, Some(10));
}

#[test]
fn non_positive_parallelism_selects_the_default() {
    assert_eq!(normalize_parallelism(None), 0);
    assert_eq!(normalize_parallelism(Some(0)), 0);
    assert_eq!(normalize_parallelism(Some(-3)), 0);
    assert_eq!(normalize_parallelism(Some(12)), 12);

    let cli = parse(&["--catalog", "/tmp/apps.json", "--parallelism", "-1"]);
    let mut config = RawConfig::default();
    config.apply_cli_overrides(&cli);
    assert_eq!(config.resolve(&cli).unwrap().max_parallelism, 0);
}

#[test]
fn disabling_expansion_drops_the_dictionary() {
    let cli = parse(&["--catalog", "/tmp/apps.json", "--no-expand"]);
    let mut config = RawConfig::default();
    config.expander.dictionary = Some(PathBuf::from("/tmp/dict.json"));
    config.apply_cli_overrides(&cli);

    assert_eq!(config.resolve(&cli).unwrap().dictionary, None);
}

#[test]
fn zero_limit_is_rejected_with_its_origin() {
    let cli = parse(&["--catalog", "/tmp/apps.json", "--limit", "0"]);
    let mut config = RawConfig::default();
    config.apply_cli_overrides(&cli);

    let message = config.resolve(&cli).unwrap_err().to_string();
    assert!(message.contains("search.limit"));
    assert!(message.contains("--limit"));
}
