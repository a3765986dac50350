pub mod fold_assignment;
pub mod identifiers;

pub use fold_assignment::{FoldAssignment, FoldError, FoldIndexVector};
pub use identifiers::{FoldIndex, GroupKey};
