use serde::{Deserialize, Serialize};

use super::metadata::Metadata;
use crate::partition::GroupKeyOf;
use crate::types::fold_assignment::FoldError;
use crate::types::identifiers::GroupKey;

/// Column that names the source file in discourse corpora.
pub const DEFAULT_GROUP_COLUMN: &str = "FILE";

/// One row of a tabular dataset: an id plus named meta columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub metadata: Metadata,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_string(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.metadata.insert(column, value);
        self
    }

    pub fn with_number(mut self, column: impl Into<String>, value: i64) -> Self {
        self.metadata.insert(column, value);
        self
    }
}

/// Reads the group key from a named meta column.
///
/// Values are compared by their rendered text, so a string `"17"` and a
/// number `17` in the same column land in the same group. Keep a grouping
/// column to a single value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaColumn {
    name: String,
}

impl MetaColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for MetaColumn {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_COLUMN)
    }
}

impl GroupKeyOf<Record> for MetaColumn {
    type Key = GroupKey;

    fn group_key(&self, record_index: usize, record: &Record) -> Result<GroupKey, FoldError> {
        record
            .metadata
            .get(&self.name)
            .map(|value| GroupKey::new(value.render()))
            .ok_or_else(|| FoldError::MissingColumn {
                record_index,
                column: self.name.clone(),
            })
    }
}
