// src/fetch.rs
//
// Per-issue retrieval: reuse what's on disk, otherwise pace, request, save.

use std::{path::PathBuf, thread, time::Duration};

use tracing::{debug, info};

use crate::{
    core::{FetchResult, IssueSource},
    error::Error,
    file::{Layout, write_atomic},
};

/// Delay enforced between two network attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Pacing {
    delay: Duration,
}

impl Pacing {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetched {
    Saved { path: PathBuf, bytes: u64 },
    /// Archive was already on disk; no request made.
    Reused { path: PathBuf },
    Missing,
}

pub struct Fetcher<S> {
    source: S,
    layout: Layout,
    pacing: Pacing,
    requests: usize,
}

impl<S: IssueSource> Fetcher<S> {
    pub fn new(source: S, layout: Layout, pacing: Pacing) -> Self {
        Self { source, layout, pacing, requests: 0 }
    }

    /// Number of issues that went to the source so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn fetch(&mut self, issue: u32) -> Result<Fetched, Error> {
        let path = self.layout.archive_path(issue);
        if self.layout.has_archive(issue) {
            info!(issue, path = %path.display(), "already present, skipping download");
            return Ok(Fetched::Reused { path });
        }

        if self.requests > 0 {
            self.pacing.pause();
        }
        self.requests += 1;

        match self.source.fetch(issue) {
            FetchResult::Found { bytes, filename } => {
                debug!(issue, filename = %filename, "received");
                write_atomic(&path, &bytes).map_err(Error::io(&path))?;
                let bytes = bytes.len() as u64;
                info!(issue, path = %path.display(), kb = bytes / 1024, "saved");
                Ok(Fetched::Saved { path, bytes })
            }
            FetchResult::NotFound => Ok(Fetched::Missing),
            FetchResult::TransientError(e) => Err(e.into()),
        }
    }
}
