// src/core/archive.rs
//
// Pull the PGN member out of a downloaded issue archive.

use std::{
    fs::{self, File},
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use zip::{ZipArchive, result::ZipError};

use crate::config::consts::MAX_PREALLOC;
use crate::file::{Layout, write_atomic};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid zip archive", path.display())]
    BadArchive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("{} has no .pgn member", path.display())]
    MissingMember { path: PathBuf },

    #[error("corrupt member {member} in {}", path.display())]
    Corrupt {
        path: PathBuf,
        member: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One issue's extracted data file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extracted {
    pub issue: u32,
    pub member: String,
    pub path: PathBuf,
    pub bytes: u64,
}

pub struct Extractor {
    layout: Layout,
    discard_archives: bool,
}

impl Extractor {
    pub fn new(layout: Layout, discard_archives: bool) -> Self {
        Self { layout, discard_archives }
    }

    /// Extract `twic<N>.pgn` next to `twic<N>g.zip`.
    pub fn extract(&self, issue: u32) -> Result<Extracted, ExtractError> {
        let archive = self.layout.archive_path(issue);
        let target = self.layout.data_path(issue);
        let (member, bytes) = extract_pgn(&archive, &target)?;
        debug!(issue, member = %member, bytes, "extracted");

        if self.discard_archives {
            if let Err(e) = fs::remove_file(&archive) {
                warn!(issue, path = %archive.display(), error = %e, "could not discard archive");
            }
        }
        Ok(Extracted { issue, member, path: target, bytes })
    }
}

fn is_pgn(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pgn")
}

/// Copy the first `.pgn` member of `archive` to `target`.
/// Returns the member name and the number of bytes written.
pub fn extract_pgn(archive: &Path, target: &Path) -> Result<(String, u64), ExtractError> {
    let file = File::open(archive)
        .map_err(|source| ExtractError::Open { path: archive.to_path_buf(), source })?;
    let bad = |source| ExtractError::BadArchive { path: archive.to_path_buf(), source };
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(bad)?;

    let mut member_ix = None;
    for i in 0..zip.len() {
        let entry = zip.by_index(i).map_err(bad)?;
        if entry.is_file() && is_pgn(entry.name()) {
            member_ix = Some(i);
            break;
        }
    }
    let ix = member_ix.ok_or_else(|| ExtractError::MissingMember { path: archive.to_path_buf() })?;

    let mut entry = zip.by_index(ix).map_err(bad)?;
    let member = entry.name().to_string();
    // header size is untrusted; only a hint
    let mut buf = Vec::with_capacity((entry.size() as usize).min(MAX_PREALLOC));
    entry.read_to_end(&mut buf).map_err(|source| ExtractError::Corrupt {
        path: archive.to_path_buf(),
        member: member.clone(),
        source,
    })?;

    write_atomic(target, &buf)
        .map_err(|source| ExtractError::Write { path: target.to_path_buf(), source })?;
    Ok((member, buf.len() as u64))
}
