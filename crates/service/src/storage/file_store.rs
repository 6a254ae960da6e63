use std::{
    io,
    path::{Path, PathBuf},
};

use configs::StorageConfig;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::storage::file_type::{FileType, NamingConvention};
use crate::storage::fs::{FileSystem, TokioFs};

/// Locates, loads and replaces single-instance store files in one directory.
///
/// Holds no state beyond its configuration, so concurrent calls are not
/// coordinated: callers that interleave `save` and `load` must serialize them.
#[derive(Debug, Clone)]
pub struct FileStore<F = TokioFs> {
    fs: F,
    dir: PathBuf,
    naming: NamingConvention,
}

impl FileStore<TokioFs> {
    pub fn open<P: Into<PathBuf>>(dir: P, naming: NamingConvention) -> Self {
        Self::with_fs(TokioFs, dir, naming)
    }

    pub fn from_config(cfg: &StorageConfig) -> Self {
        Self::open(cfg.data_dir.clone(), NamingConvention::from_config(&cfg.naming))
    }
}

impl<F: FileSystem> FileStore<F> {
    pub fn with_fs<P: Into<PathBuf>>(fs: F, dir: P, naming: NamingConvention) -> Self {
        Self { fs, dir: dir.into(), naming }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn naming(&self) -> &NamingConvention { &self.naming }

    /// Sorted names in the storage directory that belong to `file_type`.
    /// A missing directory counts as empty; other scan failures pass through.
    async fn candidates(&self, file_type: FileType) -> Result<Vec<String>, StoreError> {
        let names = match self.fs.read_dir(&self.dir).await {
            Ok(names) => names,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut matched: Vec<String> = names
            .into_iter()
            .filter(|name| self.naming.matches(file_type, name))
            .collect();
        matched.sort();
        Ok(matched)
    }

    /// Path of the single store file of `file_type`.
    pub async fn detect(&self, file_type: FileType) -> Result<PathBuf, StoreError> {
        let mut candidates = self.candidates(file_type).await?;
        match candidates.len() {
            0 => Err(StoreError::NoStoreFound),
            1 => Ok(self.dir.join(candidates.remove(0))),
            _ => Err(StoreError::MultipleStoresFound),
        }
    }

    /// Raw content of the single store file of `file_type`.
    pub async fn load(&self, file_type: FileType) -> Result<Vec<u8>, StoreError> {
        let path = self.detect(file_type).await?;
        Ok(self.fs.read_file(&path).await?)
    }

    /// Write `content` as a fresh variant, then delete every older variant.
    ///
    /// The new file is written first: if removal is interrupted the next `load`
    /// reports [`StoreError::MultipleStoresFound`] instead of losing data.
    pub async fn save(&self, file_type: FileType, content: &[u8]) -> Result<PathBuf, StoreError> {
        self.fs.create_dir_all(&self.dir).await?;
        let name = self.naming.file_name(file_type, &Uuid::new_v4().simple().to_string());
        let path = self.dir.join(&name);
        self.fs.write_file(&path, content).await?;
        debug!(%file_type, path = %path.display(), bytes = content.len(), "store written");

        let mut replaced = 0usize;
        for stale in self.candidates(file_type).await?.into_iter().filter(|n| *n != name) {
            match self.fs.remove_file(&self.dir.join(&stale)).await {
                Ok(()) => replaced += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        info!(%file_type, path = %path.display(), replaced, "store saved");
        Ok(path)
    }

    /// Delete every variant of `file_type`; returns how many files were removed.
    pub async fn remove(&self, file_type: FileType) -> Result<usize, StoreError> {
        let mut removed = 0usize;
        for name in self.candidates(file_type).await? {
            match self.fs.remove_file(&self.dir.join(&name)).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        info!(%file_type, dir = %self.dir.display(), removed, "store removed");
        Ok(removed)
    }
}
