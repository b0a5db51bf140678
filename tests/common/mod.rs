// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};

use twic_scrape::core::{FetchError, FetchResult, IssueSource};
use twic_scrape::file::Layout;
use twic_scrape::progress::Progress;
use twic_scrape::{IssueOutcome, RunSummary};
use zip::{ZipWriter, write::SimpleFileOptions};

pub enum Reply {
    Bytes(Vec<u8>),
    NotFound,
    Status(u16),
}

/// In-memory issue source. Anything not scripted is a 404.
#[derive(Default)]
pub struct Scripted {
    replies: HashMap<u32, Reply>,
    pub calls: Vec<u32>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pgn(mut self, issue: u32, body: &str) -> Self {
        let name = format!("twic{issue}.pgn");
        self.replies.insert(issue, Reply::Bytes(zip_bytes(&[(&name, body.as_bytes())])));
        self
    }

    pub fn raw(mut self, issue: u32, bytes: &[u8]) -> Self {
        self.replies.insert(issue, Reply::Bytes(bytes.to_vec()));
        self
    }

    pub fn status(mut self, issue: u32, status: u16) -> Self {
        self.replies.insert(issue, Reply::Status(status));
        self
    }
}

impl IssueSource for Scripted {
    fn fetch(&mut self, issue: u32) -> FetchResult {
        self.calls.push(issue);
        match self.replies.get(&issue).unwrap_or(&Reply::NotFound) {
            Reply::Bytes(b) => FetchResult::Found { bytes: b.clone(), filename: Layout::archive_name(issue) },
            Reply::NotFound => FetchResult::NotFound,
            Reply::Status(status) => FetchResult::TransientError(FetchError::Status {
                issue,
                url: format!("http://test/{}", Layout::archive_name(issue)),
                status: *status,
            }),
        }
    }
}

pub fn zip_bytes(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zw = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in members {
        zw.start_file(*name, SimpleFileOptions::default()).unwrap();
        zw.write_all(data).unwrap();
    }
    zw.finish().unwrap().into_inner()
}

#[derive(Default)]
pub struct Recorder {
    pub began: bool,
    pub ticks: Vec<u32>,
    pub done: Vec<(u32, IssueOutcome)>,
    pub finished: Option<RunSummary>,
}

impl Progress for Recorder {
    fn begin(&mut self, _opts: &twic_scrape::config::RunOptions) {
        self.began = true;
    }
    fn tick(&mut self, issue: u32, _so_far: &RunSummary, _misses: u32) {
        self.ticks.push(issue);
    }
    fn item_done(&mut self, issue: u32, outcome: IssueOutcome) {
        self.done.push((issue, outcome));
    }
    fn finish(&mut self, summary: &RunSummary) {
        self.finished = Some(summary.clone());
    }
}
