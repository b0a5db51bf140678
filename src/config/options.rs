// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

/// Everything one run needs, independent of how it was parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    pub start: u32,
    /// `Some` switches to bounded mode; the miss threshold is then ignored.
    pub end: Option<u32>,
    pub out_dir: PathBuf,
    pub sleep_secs: f64,
    pub max_misses: u32,
    /// Probe with HEAD before GET.
    pub probe_head: bool,
    pub timeout_secs: u64,
    pub extract: bool,
    pub discard_archives: bool,
    pub merge: Option<MergeOptions>,
    pub log_every: u32,
    pub base_url: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            start: 1,
            end: None,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            sleep_secs: REQUEST_PAUSE_SECS,
            max_misses: MAX_MISSES,
            probe_head: true,
            timeout_secs: TIMEOUT_SECS,
            extract: false,
            discard_archives: false,
            merge: None,
            log_every: LOG_EVERY,
            base_url: BASE_URL.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MergeMode {
    #[default]
    Overwrite,
    Append,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOptions {
    pub target: PathBuf,
    pub mode: MergeMode,
}

impl MergeOptions {
    pub fn overwrite(target: impl AsRef<Path>) -> Self {
        Self { target: target.as_ref().to_path_buf(), mode: MergeMode::Overwrite }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("--merge requires --extract (merging works on extracted PGN files)")]
    MergeWithoutExtract,

    #[error("--discard-archives requires --extract")]
    DiscardWithoutExtract,

    #[error("end issue {end} is before start issue {start}")]
    EndBeforeStart { start: u32, end: u32 },

    #[error("invalid delay between requests: {0}s")]
    InvalidSleep(f64),
}

impl RunOptions {
    /// Reject combinations that can't produce a meaningful run.
    /// Called before anything touches the network or the disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.merge.is_some() && !self.extract {
            return Err(ConfigError::MergeWithoutExtract);
        }
        if self.discard_archives && !self.extract {
            return Err(ConfigError::DiscardWithoutExtract);
        }
        if let Some(end) = self.end {
            if end < self.start {
                return Err(ConfigError::EndBeforeStart { start: self.start, end });
            }
        }
        self.request_pause()?;
        Ok(())
    }

    /// Negative, NaN and too-large-for-`Duration` values are all rejected.
    pub fn request_pause(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.sleep_secs)
            .map_err(|_| ConfigError::InvalidSleep(self.sleep_secs))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
