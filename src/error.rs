// src/error.rs
use std::{io, path::PathBuf};

use crate::config::ConfigError;
use crate::core::FetchError;

/// Failures that end a run. Bad archives never get here; they are skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("I/O failure on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }

    /// 2 for bad invocations, 1 for anything that went wrong mid-run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            Error::Fetch(_) | Error::Io { .. } => 1,
        }
    }
}
