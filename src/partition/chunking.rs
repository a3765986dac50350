use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::GroupKeyOf;
use crate::types::fold_assignment::{FoldAssignment, FoldError, FoldIndexVector};
use crate::types::identifiers::FoldIndex;

/// Assign every distinct group in `records` to one of `k` folds.
///
/// Groups are taken in first-occurrence order and dealt out in rounds of `k`;
/// each round gets a fresh permutation of `0..k`, so fold sizes (in groups)
/// never differ by more than one. When `k` exceeds the number of groups the
/// surplus folds stay empty.
pub fn build_fold_assignment<R, G, Rn>(
    records: &[R],
    k: usize,
    key_of: &G,
    rng: &mut Rn,
) -> Result<FoldAssignment<G::Key>, FoldError>
where
    G: GroupKeyOf<R>,
    Rn: Rng + ?Sized,
{
    validate_fold_count(k)?;
    if records.is_empty() {
        return Err(FoldError::InvalidArgument(
            "dataset is empty, there are no groups to assign".to_string(),
        ));
    }

    // 1. Distinct groups, first occurrence wins
    let mut seen = BTreeSet::new();
    let mut groups = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let key = key_of.group_key(i, record)?;
        if seen.insert(key.clone()) {
            groups.push(key);
        }
    }

    if k > groups.len() {
        tracing::warn!(
            folds = k,
            groups = groups.len(),
            "fold count exceeds distinct groups; some folds will be empty"
        );
    }

    // 2. Shuffled rounds
    let folds = chunked_folds(groups.len(), k, rng);
    let assignment = FoldAssignment::from_entries(k, groups.into_iter().zip(folds))?;

    tracing::debug!(
        records = records.len(),
        groups = assignment.len(),
        folds = k,
        sizes = ?assignment.fold_sizes(),
        "built group fold assignment"
    );

    Ok(assignment)
}

/// Group-unaware baseline: one fold per record, balanced the same way.
///
/// Records of one group may be split across folds; useful as a comparison
/// point for how much grouping changes an evaluation.
pub fn naive_fold_indices<Rn>(
    records: usize,
    k: usize,
    rng: &mut Rn,
) -> Result<FoldIndexVector, FoldError>
where
    Rn: Rng + ?Sized,
{
    validate_fold_count(k)?;
    if records == 0 {
        return Err(FoldError::InvalidArgument(
            "dataset is empty, there are no records to assign".to_string(),
        ));
    }
    FoldIndexVector::new(k, chunked_folds(records, k, rng))
}

fn validate_fold_count(k: usize) -> Result<(), FoldError> {
    if k == 0 {
        return Err(FoldError::InvalidArgument(
            "fold count must be positive".to_string(),
        ));
    }
    Ok(())
}

/// `n` fold indices dealt in rounds of `k`, each round a prefix of a random
/// permutation of `0..k`.
fn chunked_folds<Rn>(n: usize, k: usize, rng: &mut Rn) -> Vec<FoldIndex>
where
    Rn: Rng + ?Sized,
{
    let mut permutation: Vec<FoldIndex> = (0..k).collect();
    let mut folds = Vec::with_capacity(n);
    while folds.len() < n {
        permutation.shuffle(rng);
        let take = (n - folds.len()).min(k);
        folds.extend_from_slice(&permutation[..take]);
    }
    folds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn each_round_is_a_permutation_prefix() {
        let mut rng = StdRng::seed_from_u64(11);
        let folds = chunked_folds(10, 4, &mut rng);
        assert_eq!(folds.len(), 10);

        for round in folds.chunks(4) {
            let distinct: BTreeSet<_> = round.iter().collect();
            assert_eq!(distinct.len(), round.len());
            assert!(round.iter().all(|f| *f < 4));
        }
    }

    #[test]
    fn empty_input_yields_no_folds() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(chunked_folds(0, 3, &mut rng).is_empty());
    }
}
