use std::{io, path::Path, sync::Arc};

use async_trait::async_trait;
use tokio::fs;

/// File system operations the store depends on.
/// `TokioFs` talks to the real disk; tests swap in an in-memory fake.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Names of the entries directly under `dir`.
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
    async fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    async fn remove_file(&self, path: &Path) -> io::Result<()>;
    async fn create_dir_all(&self, dir: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl FileSystem for TokioFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // non-UTF-8 names can never match a prefix
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir).await
    }
}

#[async_trait]
impl<F: FileSystem + ?Sized> FileSystem for Arc<F> {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<String>> { (**self).read_dir(dir).await }
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> { (**self).read_file(path).await }
    async fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> { (**self).write_file(path, contents).await }
    async fn remove_file(&self, path: &Path) -> io::Result<()> { (**self).remove_file(path).await }
    async fn create_dir_all(&self, dir: &Path) -> io::Result<()> { (**self).create_dir_all(dir).await }
}
