pub mod config;
pub mod fold_file;
pub mod writer;

pub use config::FoldConfig;
pub use fold_file::{assignment_version, FoldFile, FoldFileEntry, FOLD_FILE_FORMAT_VERSION};
pub use writer::{FoldFileError, FoldFileWriter};
