//! Store service: locates, loads and replaces single-instance store files.
//! - `storage::FileStore` enforces "exactly one store per type".
//! - `storage::FileSystem` is the I/O seam; `TokioFs` is the real one.
//! - `errors::StoreError` carries the fixed error codes callers map to exit statuses.

pub mod errors;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use errors::{ErrorCode, StoreError};
pub use storage::{FileStore, FileSystem, FileType, NamingConvention, TokioFs};
