//! Group-aware k-fold partitioning for cross-validation.
//!
//! `group-folds` splits a dataset into k folds of roughly equal size, counted
//! in groups, such that every record sharing a group key (source document,
//! dialogue id, ...) lands in the same fold. Train and test splits built from
//! the resulting selection vector never leak a group across the boundary.
//!
//! Randomness is always injected by the caller, so a seeded rng reproduces a
//! partition exactly.

pub mod evaluation;
pub mod folds;
pub mod partition;
pub mod record;
pub mod types;
