use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::folds::config::FoldConfig;
use crate::folds::writer::FoldFileError;
use crate::types::fold_assignment::FoldAssignment;
use crate::types::identifiers::{FoldIndex, GroupKey};

pub const FOLD_FILE_FORMAT_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldFileEntry {
    pub group: GroupKey,
    pub fold: FoldIndex,
}

/// On-disk form of a fold assignment. Entries keep first-occurrence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldFile {
    pub format_version: String,
    pub assignment_version: String,
    pub config: FoldConfig,
    pub created_at: DateTime<Utc>, // informational only
    pub fold_count: usize,
    pub group_count: usize,
    pub entries: Vec<FoldFileEntry>,
}

impl FoldFile {
    pub fn from_assignment(
        config: &FoldConfig,
        assignment: &FoldAssignment<GroupKey>,
    ) -> Result<Self, FoldFileError> {
        if config.folds != assignment.fold_count() {
            return Err(FoldFileError::FoldCountMismatch {
                config: config.folds,
                assignment: assignment.fold_count(),
            });
        }

        let entries: Vec<FoldFileEntry> = assignment
            .iter()
            .map(|(group, fold)| FoldFileEntry {
                group: group.clone(),
                fold,
            })
            .collect();

        Ok(Self {
            format_version: FOLD_FILE_FORMAT_VERSION.to_string(),
            assignment_version: assignment_version(config, &entries)?,
            config: config.clone(),
            created_at: Utc::now(),
            fold_count: assignment.fold_count(),
            group_count: entries.len(),
            entries,
        })
    }

    /// Read a fold file and check it against its own declared counts and version.
    pub fn load(path: &Path) -> Result<Self, FoldFileError> {
        let f = fs::File::open(path)?;
        let file: FoldFile = serde_json::from_reader(f)?;
        file.verify()?;
        Ok(file)
    }

    pub fn verify(&self) -> Result<(), FoldFileError> {
        if self.format_version != FOLD_FILE_FORMAT_VERSION {
            return Err(FoldFileError::UnsupportedFormat(self.format_version.clone()));
        }
        if self.config.folds != self.fold_count {
            return Err(FoldFileError::FoldCountMismatch {
                config: self.config.folds,
                assignment: self.fold_count,
            });
        }
        if self.group_count != self.entries.len() {
            return Err(FoldFileError::GroupCountMismatch {
                declared: self.group_count,
                actual: self.entries.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for entry in &self.entries {
            if !seen.insert(&entry.group) {
                return Err(FoldFileError::DuplicateGroup(entry.group.to_string()));
            }
            if entry.fold >= self.fold_count {
                return Err(FoldFileError::FoldOutOfRange {
                    group: entry.group.to_string(),
                    fold: entry.fold,
                    fold_count: self.fold_count,
                });
            }
        }

        let expected = assignment_version(&self.config, &self.entries)?;
        if expected != self.assignment_version {
            return Err(FoldFileError::VersionMismatch {
                declared: self.assignment_version.clone(),
                computed: expected,
            });
        }
        Ok(())
    }

    pub fn to_assignment(&self) -> Result<FoldAssignment<GroupKey>, FoldFileError> {
        let assignment = FoldAssignment::from_entries(
            self.fold_count,
            self.entries.iter().map(|e| (e.group.clone(), e.fold)),
        )?;
        Ok(assignment)
    }
}

/// `sha256:<hex>` over the config JSON followed by one `group:fold` line per entry.
pub fn assignment_version(
    config: &FoldConfig,
    entries: &[FoldFileEntry],
) -> Result<String, FoldFileError> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(config)?);

    for entry in entries {
        let line = format!("{}:{}\n", entry.group.as_str(), entry.fold);
        hasher.update(line.as_bytes());
    }

    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}
