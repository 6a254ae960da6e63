use std::{fmt, io};
use thiserror::Error;

pub const NO_STORE_FOUND: u8 = 2;
pub const MULTIPLE_STORES_FOUND: u8 = 3;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot detect the saved data. Make sure the data was saved before loading.")]
    NoStoreFound,
    #[error("Multiple variants of the saved data detected. Restore the data from backup or regenerate it.")]
    MultipleStoresFound,
    /// File system failure, surfaced exactly as the OS reported it.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Machine-readable code of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Store(u8),
    Os(i32),
    Kind(io::ErrorKind),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Store(code) => write!(f, "{code}"),
            ErrorCode::Os(code) => write!(f, "{code}"),
            ErrorCode::Kind(kind) => write!(f, "{kind:?}"),
        }
    }
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::NoStoreFound => ErrorCode::Store(NO_STORE_FOUND),
            StoreError::MultipleStoresFound => ErrorCode::Store(MULTIPLE_STORES_FOUND),
            StoreError::Io(e) => match e.raw_os_error() {
                Some(code) => ErrorCode::Os(code),
                None => ErrorCode::Kind(e.kind()),
            },
        }
    }

    /// Process exit status for this error. OS codes outside `1..=255` map to `1`.
    pub fn exit_code(&self) -> u8 {
        match self.code() {
            ErrorCode::Store(code) => code,
            ErrorCode::Os(code) => u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1),
            ErrorCode::Kind(_) => 1,
        }
    }
}
