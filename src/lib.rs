// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod file;
pub mod log;
pub mod merge;
pub mod progress;
pub mod runner;

pub use error::Error;
pub use runner::{IssueOutcome, RunSummary, run, run_with};
