// src/progress.rs
use std::time::Instant;

use tracing::info;

use crate::config::RunOptions;
use crate::runner::{IssueOutcome, RunSummary};

/// Lightweight progress reporting for the issue walk.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once, after validation and before the first issue.
    fn begin(&mut self, _opts: &RunOptions) {}

    /// Called before each attempt with the counts so far.
    fn tick(&mut self, _issue: u32, _so_far: &RunSummary, _misses: u32) {}

    /// Called when one issue has been fully handled.
    fn item_done(&mut self, _issue: u32, _outcome: IssueOutcome) {}

    /// Called at the end of a successful run.
    fn finish(&mut self, _summary: &RunSummary) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress lines through `tracing`: the first attempt, then every `every`th.
pub struct LogProgress {
    every: u32,
    max_misses: u32,
    iterations: u32,
    started: Instant,
}

impl LogProgress {
    pub fn new(every: u32) -> Self {
        Self { every, max_misses: 0, iterations: 0, started: Instant::now() }
    }

    /// Whether the `n`th (1-based) iteration gets a progress line.
    pub fn due(&self, n: u32) -> bool {
        self.every > 0 && (n == 1 || n % self.every == 0)
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, opts: &RunOptions) {
        self.max_misses = opts.max_misses;
        self.started = Instant::now();
    }

    fn tick(&mut self, issue: u32, so_far: &RunSummary, misses: u32) {
        self.iterations += 1;
        if !self.due(self.iterations) {
            return;
        }
        info!(
            issue,
            downloaded = so_far.downloaded,
            reused = so_far.reused,
            missed = so_far.missed,
            bad = so_far.bad_archives,
            misses = %format!("{misses}/{}", self.max_misses),
            elapsed_s = self.started.elapsed().as_secs(),
            "progress"
        );
    }

    fn finish(&mut self, s: &RunSummary) {
        info!(
            attempts = s.attempts,
            downloaded = s.downloaded,
            reused = s.reused,
            missed = s.missed,
            bad = s.bad_archives,
            extracted = s.extracted,
            merged = s.merged,
            elapsed_s = s.elapsed.as_secs(),
            "finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_on_first_and_every_nth() {
        let p = LogProgress::new(10);
        let due: Vec<u32> = (1..=30).filter(|&n| p.due(n)).collect();
        assert_eq!(due, vec![1, 10, 20, 30]);
    }

    #[test]
    fn zero_disables_periodic_lines() {
        let p = LogProgress::new(0);
        assert!(!(1..=100).any(|n| p.due(n)));
    }
}
