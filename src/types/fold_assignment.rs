use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::identifiers::FoldIndex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FoldError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Record {record_index} has group {group} which is absent from the fold assignment")]
    MissingGroup { record_index: usize, group: String },

    #[error("Record {record_index} has no `{column}` column")]
    MissingColumn { record_index: usize, column: String },
}

/// Mapping from group key to fold index.
///
/// Built once per partitioning call and immutable afterwards. Groups are kept
/// in first-occurrence order alongside a sorted index for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldAssignment<K> {
    fold_count: usize,
    groups: Vec<K>,
    index: BTreeMap<K, FoldIndex>,
}

impl<K: Ord + Clone> FoldAssignment<K> {
    /// Build an assignment from `(group, fold)` pairs in first-occurrence order.
    ///
    /// Rejects a zero fold count, duplicate groups and folds outside `0..fold_count`.
    pub fn from_entries(
        fold_count: usize,
        entries: impl IntoIterator<Item = (K, FoldIndex)>,
    ) -> Result<Self, FoldError> {
        if fold_count == 0 {
            return Err(FoldError::InvalidArgument(
                "fold count must be positive".to_string(),
            ));
        }

        let mut groups = Vec::new();
        let mut index = BTreeMap::new();
        for (position, (group, fold)) in entries.into_iter().enumerate() {
            if fold >= fold_count {
                return Err(FoldError::InvalidArgument(format!(
                    "entry {position} has fold {fold}, expected < {fold_count}"
                )));
            }
            if index.insert(group.clone(), fold).is_some() {
                return Err(FoldError::InvalidArgument(format!(
                    "entry {position} repeats an earlier group"
                )));
            }
            groups.push(group);
        }

        Ok(Self {
            fold_count,
            groups,
            index,
        })
    }

    pub fn fold_count(&self) -> usize {
        self.fold_count
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn fold_of(&self, group: &K) -> Option<FoldIndex> {
        self.index.get(group).copied()
    }

    /// Groups in the order they were first encountered.
    pub fn groups(&self) -> &[K] {
        &self.groups
    }

    /// `(group, fold)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, FoldIndex)> + '_ {
        self.groups.iter().map(move |g| (g, self.index[g]))
    }

    /// Number of groups per fold; always `fold_count` long.
    pub fn fold_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.fold_count];
        for fold in self.index.values() {
            sizes[*fold] += 1;
        }
        sizes
    }

    pub fn groups_in_fold(&self, fold: FoldIndex) -> Vec<&K> {
        self.iter()
            .filter(|(_, f)| *f == fold)
            .map(|(g, _)| g)
            .collect()
    }
}

/// One fold index per record, aligned with dataset order.
///
/// This is the "selection vector" shape accepted by cross-validation drivers.
/// Every index is below `fold_count`, including after deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFoldIndexVector")]
pub struct FoldIndexVector {
    fold_count: usize,
    indices: Vec<FoldIndex>,
}

#[derive(Deserialize)]
struct RawFoldIndexVector {
    fold_count: usize,
    indices: Vec<FoldIndex>,
}

impl TryFrom<RawFoldIndexVector> for FoldIndexVector {
    type Error = FoldError;

    fn try_from(raw: RawFoldIndexVector) -> Result<Self, FoldError> {
        FoldIndexVector::new(raw.fold_count, raw.indices)
    }
}

impl FoldIndexVector {
    pub fn new(fold_count: usize, indices: Vec<FoldIndex>) -> Result<Self, FoldError> {
        if fold_count == 0 {
            return Err(FoldError::InvalidArgument(
                "fold count must be positive".to_string(),
            ));
        }
        if let Some((record, fold)) = indices
            .iter()
            .enumerate()
            .find(|(_, f)| **f >= fold_count)
        {
            return Err(FoldError::InvalidArgument(format!(
                "record {record} has fold {fold}, expected < {fold_count}"
            )));
        }

        Ok(Self {
            fold_count,
            indices,
        })
    }

    pub fn fold_count(&self) -> usize {
        self.fold_count
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[FoldIndex] {
        &self.indices
    }

    pub fn get(&self, record: usize) -> Option<FoldIndex> {
        self.indices.get(record).copied()
    }

    /// Record positions held out when `fold` is the test fold.
    pub fn test_indices(&self, fold: FoldIndex) -> Vec<usize> {
        self.positions(|f| f == fold)
    }

    /// Record positions used for training when `fold` is the test fold.
    pub fn train_indices(&self, fold: FoldIndex) -> Vec<usize> {
        self.positions(|f| f != fold)
    }

    /// Number of records per fold.
    pub fn record_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.fold_count];
        for fold in &self.indices {
            counts[*fold] += 1;
        }
        counts
    }

    fn positions(&self, keep: impl Fn(FoldIndex) -> bool) -> Vec<usize> {
        self.indices
            .iter()
            .enumerate()
            .filter(|(_, f)| keep(**f))
            .map(|(i, _)| i)
            .collect()
    }
}
