use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::record::{MetaColumn, DEFAULT_GROUP_COLUMN};
use crate::types::fold_assignment::FoldError;

pub const DEFAULT_FOLDS: usize = 5;

// Serializable, comparable, explicit defaults.
// Hashed into the fold file version, so field order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldConfig {
    pub folds: usize,
    pub group_column: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            folds: DEFAULT_FOLDS,
            group_column: DEFAULT_GROUP_COLUMN.into(),
            seed: None,
        }
    }
}

impl FoldConfig {
    pub fn with_folds(folds: usize) -> Self {
        Self {
            folds,
            ..Self::default()
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), FoldError> {
        if self.folds == 0 {
            return Err(FoldError::InvalidArgument(
                "fold count must be positive".to_string(),
            ));
        }
        if self.group_column.is_empty() {
            return Err(FoldError::InvalidArgument(
                "group column name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Accessor for the configured group column.
    pub fn column(&self) -> MetaColumn {
        MetaColumn::new(self.group_column.clone())
    }

    /// Random source for one partitioning call. Seeded configs are reproducible.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
