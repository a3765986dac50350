use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::folds::config::FoldConfig;
use crate::folds::fold_file::FoldFile;
use crate::types::fold_assignment::{FoldAssignment, FoldError};
use crate::types::identifiers::GroupKey;

#[derive(Debug, Error)]
pub enum FoldFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),
    #[error("Unsupported fold file format version: {0}")]
    UnsupportedFormat(String),
    #[error("Config declares {config} folds but the assignment has {assignment}")]
    FoldCountMismatch { config: usize, assignment: usize },
    #[error("Fold file declares {declared} groups but lists {actual}")]
    GroupCountMismatch { declared: usize, actual: usize },
    #[error("Duplicate group in fold file: {0}")]
    DuplicateGroup(String),
    #[error("Group {group} has fold {fold}, expected < {fold_count}")]
    FoldOutOfRange {
        group: String,
        fold: usize,
        fold_count: usize,
    },
    #[error("Assignment version mismatch: file says {declared}, entries hash to {computed}")]
    VersionMismatch { declared: String, computed: String },
    #[error(transparent)]
    Assignment(#[from] FoldError),
}

/// FoldFileWriter is single-threaded and never overwrites an existing file.
pub struct FoldFileWriter {
    config: FoldConfig,
}

impl FoldFileWriter {
    pub fn new(config: FoldConfig) -> Self {
        Self { config }
    }

    pub fn write(
        &self,
        assignment: &FoldAssignment<GroupKey>,
        path: &Path,
    ) -> Result<FoldFile, FoldFileError> {
        if path.exists() {
            return Err(FoldFileError::OutputExists(path.to_path_buf()));
        }

        let file = FoldFile::from_assignment(&self.config, assignment)?;

        // Temp file is keyed by the first 12 hex chars of the version
        let stem = file
            .assignment_version
            .strip_prefix("sha256:")
            .and_then(|hex| hex.get(..12))
            .unwrap_or("partial");
        let temp_path = path.with_extension(format!("tmp.{stem}"));

        if temp_path.exists() {
            fs::remove_file(&temp_path)?;
        }

        write_atomically(&temp_path, path, |f| {
            serde_json::to_writer_pretty(&mut *f, &file)?;
            f.write_all(b"\n")?;
            Ok(())
        })?;

        tracing::info!(
            path = %path.display(),
            groups = file.group_count,
            folds = file.fold_count,
            version = %file.assignment_version,
            "wrote fold file"
        );

        Ok(file)
    }
}

/// Write `temp_path` with `write`, fsync it, then rename it onto `path`.
/// A failed write removes the temp file.
fn write_atomically(
    temp_path: &Path,
    path: &Path,
    write: impl FnOnce(&mut fs::File) -> Result<(), FoldFileError>,
) -> Result<(), FoldFileError> {
    let written = fs::File::create(temp_path)
        .map_err(FoldFileError::from)
        .and_then(|mut f| {
            write(&mut f)?;
            f.sync_all()?;
            Ok(())
        });

    if let Err(err) = written {
        // Removal failure is ignored; the write error is returned
        let _ = fs::remove_file(temp_path);
        return Err(err);
    }

    fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn failed_write_removes_temp_file() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("folds.tmp.abc");
        let path = dir.path().join("folds.json");

        let result = write_atomically(&temp_path, &path, |f| {
            f.write_all(b"{\"partial\":")?;
            Err(FoldFileError::UnsupportedFormat("interrupted".to_string()))
        });

        assert!(matches!(result, Err(FoldFileError::UnsupportedFormat(_))));
        assert!(!temp_path.exists());
        assert!(!path.exists());
    }

    #[test]
    fn successful_write_renames_into_place() {
        let dir = tempdir().unwrap();
        let temp_path = dir.path().join("folds.tmp.abc");
        let path = dir.path().join("folds.json");

        write_atomically(&temp_path, &path, |f| Ok(f.write_all(b"{}")?)).unwrap();

        assert!(!temp_path.exists());
        assert_eq!(fs::read(&path).unwrap(), b"{}");
    }
}
