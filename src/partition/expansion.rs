use super::GroupKeyOf;
use crate::types::fold_assignment::{FoldAssignment, FoldError, FoldIndexVector};

/// Look up each record's group in `assignment`, in dataset order.
///
/// A record whose group is absent means the assignment was built from a
/// different dataset; this fails rather than defaulting a fold.
pub fn expand_to_record_folds<R, G>(
    records: &[R],
    assignment: &FoldAssignment<G::Key>,
    key_of: &G,
) -> Result<FoldIndexVector, FoldError>
where
    G: GroupKeyOf<R>,
{
    let mut indices = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let key = key_of.group_key(i, record)?;
        let fold = assignment
            .fold_of(&key)
            .ok_or_else(|| FoldError::MissingGroup {
                record_index: i,
                group: format!("{key:?}"),
            })?;
        indices.push(fold);
    }

    tracing::debug!(
        records = indices.len(),
        folds = assignment.fold_count(),
        "expanded fold assignment onto records"
    );

    FoldIndexVector::new(assignment.fold_count(), indices)
}
