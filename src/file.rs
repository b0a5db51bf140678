// src/file.rs

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::{ARCHIVE_EXT, DATA_EXT};

/// Where every per-issue artifact lives inside the output directory.
#[derive(Clone, Debug)]
pub struct Layout {
    dir: PathBuf,
}

impl Layout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `twic1600g.zip`
    pub fn archive_name(issue: u32) -> String {
        format!("twic{issue}g.{ARCHIVE_EXT}")
    }

    /// `twic1600.pgn`
    pub fn data_name(issue: u32) -> String {
        format!("twic{issue}.{DATA_EXT}")
    }

    pub fn archive_path(&self, issue: u32) -> PathBuf {
        self.dir.join(Self::archive_name(issue))
    }

    pub fn data_path(&self, issue: u32) -> PathBuf {
        self.dir.join(Self::data_name(issue))
    }

    /// A previous run already left a usable archive for this issue.
    pub fn has_archive(&self, issue: u32) -> bool {
        fs::metadata(self.archive_path(issue))
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Write through `<path>.part` and rename, so an interrupted run never
/// leaves a truncated file under the final name.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    ensure_parent(path)?;
    let tmp = part_path(path);
    {
        let mut f = File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
