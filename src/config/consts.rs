// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://theweekinchess.com/zips";
pub const USER_AGENT: &str = concat!("twic-scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 60;

// Walk
pub const MAX_MISSES: u32 = 3;
pub const REQUEST_PAUSE_SECS: f64 = 1.0; // be polite

// Output
pub const DEFAULT_OUT_DIR: &str = "twic_download";
pub const ARCHIVE_EXT: &str = "zip";
pub const DATA_EXT: &str = "pgn";

// Extract
pub const MAX_PREALLOC: usize = 64 << 20;

// Progress
pub const LOG_EVERY: u32 = 10;
