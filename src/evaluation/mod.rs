use crate::types::fold_assignment::{FoldError, FoldIndexVector};
use crate::types::identifiers::FoldIndex;

/// Train and test views of a dataset for one held-out fold.
#[derive(Debug)]
pub struct FoldSplit<'a, R> {
    pub fold: FoldIndex,
    pub train: Vec<&'a R>,
    pub test: Vec<&'a R>,
}

/// Borrow the records of `fold` as test data and everything else as training data.
pub fn split_fold<'a, R>(
    records: &'a [R],
    selection: &FoldIndexVector,
    fold: FoldIndex,
) -> Result<FoldSplit<'a, R>, FoldError> {
    check_alignment(records.len(), selection)?;
    if fold >= selection.fold_count() {
        return Err(FoldError::InvalidArgument(format!(
            "fold {fold} is out of range for {} folds",
            selection.fold_count()
        )));
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    for (record, f) in records.iter().zip(selection.as_slice()) {
        if *f == fold {
            test.push(record);
        } else {
            train.push(record);
        }
    }

    Ok(FoldSplit { fold, train, test })
}

/// Run `k` rounds of train, test and evaluate, one per held-out fold.
///
/// Evaluations come back in fold order. A fold with no records still gets a
/// round, with an empty test slice.
pub fn run_kfold<R, M, T, E, Train, Test, Eval>(
    records: &[R],
    selection: &FoldIndexVector,
    k: usize,
    mut train_fn: Train,
    mut test_fn: Test,
    mut eval_fn: Eval,
) -> Result<Vec<E>, FoldError>
where
    Train: FnMut(&[&R]) -> M,
    Test: FnMut(&[&R], &M) -> T,
    Eval: FnMut(T) -> E,
{
    if k == 0 {
        return Err(FoldError::InvalidArgument(
            "fold count must be positive".to_string(),
        ));
    }
    if selection.fold_count() != k {
        return Err(FoldError::InvalidArgument(format!(
            "selection vector has {} folds, expected {k}",
            selection.fold_count()
        )));
    }

    let mut evaluations = Vec::with_capacity(k);
    for fold in 0..k {
        let split = split_fold(records, selection, fold)?;
        tracing::debug!(
            fold,
            train = split.train.len(),
            test = split.test.len(),
            "running cross-validation round"
        );

        let model = train_fn(&split.train);
        let results = test_fn(&split.test, &model);
        evaluations.push(eval_fn(results));
    }

    Ok(evaluations)
}

fn check_alignment(records: usize, selection: &FoldIndexVector) -> Result<(), FoldError> {
    if selection.len() != records {
        return Err(FoldError::InvalidArgument(format!(
            "selection vector has {} entries for {records} records",
            selection.len()
        )));
    }
    Ok(())
}
