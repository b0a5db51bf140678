// src/core/mod.rs

pub mod archive;
pub mod net;
pub mod walker;

pub use archive::{ExtractError, Extracted, Extractor};
pub use net::{FetchError, FetchResult, HttpSource, IssueSource};
pub use walker::{Attempt, Bound, RangeWalker};
