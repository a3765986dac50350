pub mod chunking;
pub mod expansion;

use std::fmt;

use rand::Rng;

use crate::folds::FoldConfig;
use crate::types::fold_assignment::{FoldAssignment, FoldError, FoldIndexVector};
pub use chunking::{build_fold_assignment, naive_fold_indices};
pub use expansion::expand_to_record_folds;

/// Extracts the group key of a record.
///
/// Any `Fn(&R) -> K` is an accessor. `MetaColumn` reads a named column and
/// can fail when the column is absent.
pub trait GroupKeyOf<R> {
    type Key: Ord + Clone + fmt::Debug;

    fn group_key(&self, record_index: usize, record: &R) -> Result<Self::Key, FoldError>;
}

impl<R, K, F> GroupKeyOf<R> for F
where
    F: Fn(&R) -> K,
    K: Ord + Clone + fmt::Debug,
{
    type Key = K;

    fn group_key(&self, _record_index: usize, record: &R) -> Result<K, FoldError> {
        Ok(self(record))
    }
}

/// Config-driven front end over the partitioning functions.
///
/// Holds no state between calls; every `assign` builds a fresh assignment.
#[derive(Debug, Clone)]
pub struct GroupFoldPartitioner {
    config: FoldConfig,
}

impl GroupFoldPartitioner {
    pub fn new(config: FoldConfig) -> Result<Self, FoldError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn assign<R, G, Rn>(
        &self,
        records: &[R],
        key_of: &G,
        rng: &mut Rn,
    ) -> Result<FoldAssignment<G::Key>, FoldError>
    where
        G: GroupKeyOf<R>,
        Rn: Rng + ?Sized,
    {
        build_fold_assignment(records, self.config.folds, key_of, rng)
    }

    /// Like [`assign`](Self::assign), drawing from the configured seed (or entropy).
    pub fn assign_seeded<R, G>(
        &self,
        records: &[R],
        key_of: &G,
    ) -> Result<FoldAssignment<G::Key>, FoldError>
    where
        G: GroupKeyOf<R>,
    {
        let mut rng = self.config.rng();
        self.assign(records, key_of, &mut rng)
    }

    /// Assign groups to folds and expand the result onto the records.
    pub fn partition<R, G, Rn>(
        &self,
        records: &[R],
        key_of: &G,
        rng: &mut Rn,
    ) -> Result<(FoldAssignment<G::Key>, FoldIndexVector), FoldError>
    where
        G: GroupKeyOf<R>,
        Rn: Rng + ?Sized,
    {
        let assignment = self.assign(records, key_of, rng)?;
        let selection = expand_to_record_folds(records, &assignment, key_of)?;
        Ok((assignment, selection))
    }
}
