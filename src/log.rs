// src/log.rs
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, fmt::time::Uptime, prelude::*};

use crate::file::ensure_parent;

/// `-v` count to the default filter; `RUST_LOG` wins when set.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber: stderr always, plus an append-only
/// plain-text file when `log_file` is given. Timestamps are time since start.
pub fn init(verbose: u8, log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(Uptime::default())
        .with_target(false);

    let file = match log_file {
        Some(path) => {
            ensure_parent(path)?;
            let f = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(f))
                    .with_timer(Uptime::default())
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    // Already installed (e.g. second call in one process): keep the first.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init();
    Ok(())
}
