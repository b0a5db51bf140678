// src/merge.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::PathBuf,
};

use tracing::info;

use crate::{
    config::{MergeMode, MergeOptions},
    core::Extracted,
    error::Error,
    file::ensure_parent,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeReport {
    pub target: PathBuf,
    pub issues: usize,
    pub bytes: u64,
}

/// Concatenate extracted files into `opts.target`, ascending by issue.
/// Input order does not matter; duplicate issues are written once.
pub fn merge_issues(parts: &[Extracted], opts: &MergeOptions) -> Result<MergeReport, Error> {
    let mut ordered: Vec<&Extracted> = parts.iter().collect();
    ordered.sort_by_key(|e| e.issue);
    ordered.dedup_by_key(|e| e.issue);

    let target = &opts.target;
    ensure_parent(target).map_err(Error::io(target))?;
    let file = match opts.mode {
        MergeMode::Overwrite => File::create(target),
        MergeMode::Append => OpenOptions::new().create(true).append(true).open(target),
    }
    .map_err(Error::io(target))?;

    info!(files = ordered.len(), target = %target.display(), mode = ?opts.mode, "merging");

    let mut out = BufWriter::new(file);
    let mut bytes = 0u64;
    for part in &ordered {
        let data = fs::read(&part.path).map_err(Error::io(&part.path))?;
        out.write_all(&data).map_err(Error::io(target))?;
        bytes += data.len() as u64;
    }
    out.flush().map_err(Error::io(target))?;

    info!(target = %target.display(), bytes, "merge written");
    Ok(MergeReport { target: target.clone(), issues: ordered.len(), bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn part(dir: &Path, issue: u32, body: &str) -> Extracted {
        let path = dir.join(format!("twic{issue}.pgn"));
        fs::write(&path, body).unwrap();
        Extracted { issue, member: format!("twic{issue}.pgn"), path, bytes: body.len() as u64 }
    }

    #[test]
    fn orders_by_issue_not_by_input() {
        let dir = tempfile::tempdir().unwrap();
        let parts = vec![
            part(dir.path(), 13, "C"),
            part(dir.path(), 10, "A"),
            part(dir.path(), 11, "B"),
        ];
        let target = dir.path().join("all.pgn");

        let report = merge_issues(&parts, &MergeOptions::overwrite(&target)).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "ABC");
        assert_eq!(report.issues, 3);
        assert_eq!(report.bytes, 3);
    }

    #[test]
    fn overwrite_truncates_append_extends() {
        let dir = tempfile::tempdir().unwrap();
        let parts = vec![part(dir.path(), 1, "x")];
        let target = dir.path().join("merged").join("all.pgn");

        merge_issues(&parts, &MergeOptions::overwrite(&target)).unwrap();
        merge_issues(&parts, &MergeOptions::overwrite(&target)).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "x");

        let append = MergeOptions { target: target.clone(), mode: MergeMode::Append };
        merge_issues(&parts, &append).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "xx");
    }

    #[test]
    fn empty_set_still_creates_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("none.pgn");

        let report = merge_issues(&[], &MergeOptions::overwrite(&target)).unwrap();
        assert_eq!(report.issues, 0);
        assert_eq!(fs::read(&target).unwrap(), b"");
    }

    #[test]
    fn missing_part_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = Extracted {
            issue: 1,
            member: "twic1.pgn".into(),
            path: dir.path().join("gone.pgn"),
            bytes: 0,
        };
        let err = merge_issues(&[ghost], &MergeOptions::overwrite(dir.path().join("t.pgn"))).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, dir.path().join("gone.pgn")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn unwritable_target_is_reported_against_target() {
        let dir = tempfile::tempdir().unwrap();
        let parts = vec![part(dir.path(), 1, "x")];
        // a directory cannot be opened as the merge file
        let target = dir.path().join("blocked");
        fs::create_dir(&target).unwrap();

        match merge_issues(&parts, &MergeOptions::overwrite(&target)).unwrap_err() {
            Error::Io { path, .. } => assert_eq!(path, target),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
