//! Single-instance store files.
//!
//! A store is the one file in the storage directory whose name follows the
//! naming convention of its [`FileType`]. Zero or several such files are errors.

pub mod file_store;
pub mod file_type;
pub mod fs;

pub use file_store::FileStore;
pub use file_type::{FileType, NamingConvention, ParseFileTypeError};
pub use fs::{FileSystem, TokioFs};
