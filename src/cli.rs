// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::info;

use crate::config::consts::*;
use crate::config::{MergeMode, MergeOptions, RunOptions};
use crate::error::Error;
use crate::progress::LogProgress;
use crate::runner::{self, RunSummary};

/// Download TWIC PGN zip files (twic<N>g.zip) and optionally extract and merge them.
#[derive(Debug, Parser)]
#[command(name = "twic_scrape", version, about)]
pub struct Args {
    /// First issue to fetch, e.g. 1600
    #[arg(long)]
    pub start: u32,

    /// Last issue to fetch (inclusive). Without it, stop after --max-misses
    /// consecutive missing issues
    #[arg(long)]
    pub end: Option<u32>,

    /// Output directory
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Delay between requests, in seconds
    #[arg(long, default_value_t = REQUEST_PAUSE_SECS, allow_negative_numbers = true)]
    pub sleep: f64,

    /// Consecutive missing issues treated as the end (open-ended runs only)
    #[arg(long, default_value_t = MAX_MISSES)]
    pub max_misses: u32,

    /// Do not probe with HEAD before GET
    #[arg(long)]
    pub no_head: bool,

    /// Extract the PGN file from each archive
    #[arg(long)]
    pub extract: bool,

    /// Delete each archive once its PGN has been extracted
    #[arg(long)]
    pub discard_archives: bool,

    /// Merge all extracted PGNs into this file (requires --extract)
    #[arg(long, value_name = "FILE")]
    pub merge: Option<PathBuf>,

    /// Append to the merge file instead of overwriting it
    #[arg(long, requires = "merge")]
    pub merge_append: bool,

    /// Progress line every N issues (0 = off)
    #[arg(long, default_value_t = LOG_EVERY)]
    pub log_every: u32,

    /// HTTP timeout in seconds for both HEAD and GET
    #[arg(long, default_value_t = TIMEOUT_SECS)]
    pub timeout: u64,

    /// Where the archives live
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    /// More output (-v debug, -vv trace). RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl From<&Args> for RunOptions {
    fn from(a: &Args) -> Self {
        let mode = if a.merge_append { MergeMode::Append } else { MergeMode::Overwrite };
        RunOptions {
            start: a.start,
            end: a.end,
            out_dir: a.out.clone(),
            sleep_secs: a.sleep,
            max_misses: a.max_misses,
            probe_head: !a.no_head,
            timeout_secs: a.timeout,
            extract: a.extract,
            discard_archives: a.discard_archives,
            merge: a.merge.clone().map(|target| MergeOptions { target, mode }),
            log_every: a.log_every,
            base_url: a.base_url.clone(),
        }
    }
}

pub fn run(args: &Args) -> Result<RunSummary, Error> {
    let opts = RunOptions::from(args);
    opts.validate()?;

    info!(
        start = opts.start,
        end = ?opts.end,
        out = %opts.out_dir.display(),
        sleep_s = opts.sleep_secs,
        max_misses = opts.max_misses,
        extract = opts.extract,
        merge = ?opts.merge.as_ref().map(|m| &m.target),
        head = opts.probe_head,
        timeout_s = opts.timeout_secs,
        "TWIC downloader starting"
    );

    let mut progress = LogProgress::new(opts.log_every);
    runner::run(&opts, Some(&mut progress))
}
