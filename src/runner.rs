// src/runner.rs
//
// The fetch → extract → merge pipeline over one issue range.
// Strictly sequential: one issue is fully handled before the next starts.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::{
    config::RunOptions,
    core::{Attempt, Extracted, Extractor, HttpSource, IssueSource, RangeWalker},
    error::Error,
    fetch::{Fetched, Fetcher, Pacing},
    file::{Layout, ensure_directory},
    merge::merge_issues,
    progress::Progress,
};

/// How a single issue ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueOutcome {
    Missed,
    /// Archive kept as-is; extraction not requested.
    Fetched { reused: bool },
    Extracted { reused: bool },
    /// Archive on disk but unusable; left out of the merge.
    BadArchive { reused: bool },
}

/// Summary of what was produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempts: usize,
    pub downloaded: usize,
    pub reused: usize,
    pub missed: usize,
    pub bad_archives: usize,
    pub extracted: usize,
    pub merged: usize,
    pub merge_target: Option<PathBuf>,
    /// Open-ended walk ended on the miss threshold.
    pub reached_end: bool,
    pub elapsed: Duration,
}

/// Top-level runner over the real remote source.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary, Error> {
    opts.validate()?;
    let source = HttpSource::new(&opts.base_url, opts.timeout(), opts.probe_head)?;
    run_with(opts, source, progress)
}

/// Same as [`run`] over any source; this is what tests drive.
pub fn run_with<S: IssueSource>(
    opts: &RunOptions,
    source: S,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Error> {
    opts.validate()?;
    let pause = opts.request_pause()?;
    let started = Instant::now();

    ensure_directory(&opts.out_dir).map_err(Error::io(&opts.out_dir))?;
    let layout = Layout::new(&opts.out_dir);

    let mut fetcher = Fetcher::new(source, layout.clone(), Pacing::new(pause));
    let extractor = opts
        .extract
        .then(|| Extractor::new(layout.clone(), opts.discard_archives));
    let mut walker = RangeWalker::new(opts.start, opts.end, opts.max_misses);

    let mut summary = RunSummary::default();
    let mut extracted: Vec<Extracted> = Vec::new();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(opts);
    }

    while let Some(issue) = walker.next_issue() {
        if let Some(p) = progress.as_deref_mut() {
            p.tick(issue, &summary, walker.misses());
        }
        summary.attempts += 1;

        let fetched = fetcher.fetch(issue).inspect_err(|e| {
            error!(issue, error = %e, "fetch failed, aborting run");
        })?;

        let outcome = match fetched {
            Fetched::Missing => {
                walker.record(Attempt::Miss);
                summary.missed += 1;
                info!(issue, misses = walker.misses(), max = opts.max_misses, "not found");
                IssueOutcome::Missed
            }
            Fetched::Saved { .. } | Fetched::Reused { .. } => {
                walker.record(Attempt::Hit);
                let reused = matches!(fetched, Fetched::Reused { .. });
                if reused {
                    summary.reused += 1;
                } else {
                    summary.downloaded += 1;
                }

                match &extractor {
                    None => IssueOutcome::Fetched { reused },
                    Some(x) => match x.extract(issue) {
                        Ok(e) => {
                            info!(issue, path = %e.path.display(), "extracted");
                            summary.extracted += 1;
                            extracted.push(e);
                            IssueOutcome::Extracted { reused }
                        }
                        Err(e) => {
                            warn!(issue, error = %e, "skipping unusable archive");
                            summary.bad_archives += 1;
                            IssueOutcome::BadArchive { reused }
                        }
                    },
                }
            }
        };

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(issue, outcome);
        }
    }

    summary.reached_end = walker.exhausted_by_misses();
    if summary.reached_end {
        info!("reached the end of available issues");
    }

    if let Some(merge) = &opts.merge {
        let report = merge_issues(&extracted, merge)?;
        summary.merged = report.issues;
        summary.merge_target = Some(report.target);
    }

    summary.elapsed = started.elapsed();
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary);
    }
    Ok(summary)
}
