pub mod metadata;
pub mod record;

pub use metadata::{Metadata, MetadataValue};
pub use record::{MetaColumn, Record, DEFAULT_GROUP_COLUMN};
