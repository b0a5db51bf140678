// tests/cli_args.rs
//
// Flag parsing and mapping onto RunOptions, without running anything.

use std::path::PathBuf;

use clap::Parser;
use twic_scrape::cli::{self, Args};
use twic_scrape::config::{ConfigError, MergeMode, RunOptions};
use twic_scrape::Error;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("twic_scrape").chain(args.iter().copied())).unwrap()
}

#[test]
fn start_is_required() {
    assert!(Args::try_parse_from(["twic_scrape"]).is_err());
}

#[test]
fn defaults_match_run_options() {
    let opts = RunOptions::from(&parse(&["--start", "1600"]));
    assert_eq!(opts, RunOptions { start: 1600, ..RunOptions::default() });
    assert!(opts.probe_head);
    assert_eq!(opts.end, None);
}

#[test]
fn full_flag_set() {
    let a = parse(&[
        "--start", "1500", "--end", "1510",
        "--out", "dl", "--sleep", "0.5", "--max-misses", "5",
        "--no-head", "--extract", "--discard-archives",
        "--merge", "all.pgn", "--merge-append",
        "--log-every", "0", "--timeout", "9",
        "--base-url", "http://mirror/zips", "-vv",
    ]);
    assert_eq!(a.verbose, 2);

    let o = RunOptions::from(&a);
    assert_eq!(o.start, 1500);
    assert_eq!(o.end, Some(1510));
    assert_eq!(o.out_dir, PathBuf::from("dl"));
    assert_eq!(o.sleep_secs, 0.5);
    assert_eq!(o.max_misses, 5);
    assert!(!o.probe_head);
    assert!(o.extract && o.discard_archives);
    let merge = o.merge.unwrap();
    assert_eq!(merge.target, PathBuf::from("all.pgn"));
    assert_eq!(merge.mode, MergeMode::Append);
    assert_eq!(o.log_every, 0);
    assert_eq!(o.timeout_secs, 9);
    assert_eq!(o.base_url, "http://mirror/zips");
}

#[test]
fn merge_append_needs_merge() {
    assert!(Args::try_parse_from(["twic_scrape", "--start", "1", "--merge-append"]).is_err());
}

#[test]
fn merge_without_extract_fails_before_network() {
    // Unroutable base URL: reaching the network would be a Fetch error, not Config
    let a = parse(&["--start", "1", "--merge", "all.pgn", "--base-url", "http://127.0.0.1:9"]);
    let err = cli::run(&a).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::MergeWithoutExtract)));
}

#[test]
fn negative_sleep_is_a_config_error() {
    let a = parse(&["--start", "1", "--sleep", "-1"]);
    let err = cli::run(&a).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidSleep(_))));
    assert_eq!(err.exit_code(), 2);
}
