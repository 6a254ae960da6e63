use std::{fmt, str::FromStr};

use configs::NamingConfig;
use thiserror::Error;

/// Logical kind of persisted data; each kind has its own file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Storage,
}

impl FileType {
    pub const ALL: [FileType; 1] = [FileType::Storage];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Storage => "storage",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown file type `{0}` (expected one of: storage)")]
pub struct ParseFileTypeError(String);

impl FromStr for FileType {
    type Err = ParseFileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|ft| ft.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFileTypeError(s.to_string()))
    }
}

/// Maps a [`FileType`] to the file names that belong to it.
///
/// A name belongs to a type when it is the bare prefix, or the prefix followed by
/// the separator and a non-empty suffix (`storage`, `storage-1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    separator: String,
    storage: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::from_config(&NamingConfig::default())
    }
}

impl NamingConvention {
    pub fn new(separator: impl Into<String>, storage: impl Into<String>) -> Self {
        Self { separator: separator.into(), storage: storage.into() }
    }

    pub fn from_config(cfg: &NamingConfig) -> Self {
        Self::new(cfg.separator.clone(), cfg.storage.clone())
    }

    pub fn prefix(&self, file_type: FileType) -> &str {
        match file_type {
            FileType::Storage => &self.storage,
        }
    }

    pub fn matches(&self, file_type: FileType, name: &str) -> bool {
        match name.strip_prefix(self.prefix(file_type)) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix(self.separator.as_str())
                .is_some_and(|suffix| !suffix.is_empty()),
            None => false,
        }
    }

    pub fn file_name(&self, file_type: FileType, suffix: &str) -> String {
        format!("{}{}{}", self.prefix(file_type), self.separator, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("storage".parse::<FileType>(), Ok(FileType::Storage));
        assert_eq!("STORAGE".parse::<FileType>(), Ok(FileType::Storage));
        assert!("cache".parse::<FileType>().is_err());
        assert_eq!(FileType::Storage.to_string(), "storage");
    }

    #[test]
    fn default_convention_matches_prefixed_names() {
        let naming = NamingConvention::default();
        assert!(naming.matches(FileType::Storage, "storage-1"));
        assert!(naming.matches(FileType::Storage, "storage-2"));
        assert!(naming.matches(FileType::Storage, "storage"));

        assert!(!naming.matches(FileType::Storage, "storage-"));
        assert!(!naming.matches(FileType::Storage, "storagex"));
        assert!(!naming.matches(FileType::Storage, "storage.bak"));
        assert!(!naming.matches(FileType::Storage, "other-1"));
        assert!(!naming.matches(FileType::Storage, ""));
    }

    #[test]
    fn custom_convention_round_trips_file_names() {
        let naming = NamingConvention::new("__", "state");
        let name = naming.file_name(FileType::Storage, "abc");
        assert_eq!(name, "state__abc");
        assert!(naming.matches(FileType::Storage, &name));
        assert!(!naming.matches(FileType::Storage, "storage-1"));
        assert!(!naming.matches(FileType::Storage, "state_abc"));
    }
}
