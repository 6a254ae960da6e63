#![cfg(test)]
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::storage::FileSystem;

/// In-memory file system with an injectable directory scan failure.
#[derive(Default)]
pub struct FakeFs {
    dirs: Mutex<BTreeSet<PathBuf>>,
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    scan_error: Option<(io::ErrorKind, String)>,
    read_error: Option<(io::ErrorKind, String)>,
    remove_error: Option<(io::ErrorKind, String)>,
    vanish_on_remove: bool,
    reads: AtomicUsize,
}

impl FakeFs {
    pub fn new() -> Self { Self::default() }

    pub fn with_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.lock().expect("dirs lock").insert(dir.into());
        self
    }

    /// Adds a file and its parent directory.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &[u8]) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.dirs.lock().expect("dirs lock").insert(parent.to_path_buf());
        }
        self.files.lock().expect("files lock").insert(path, contents.to_vec());
        self
    }

    pub fn failing_scan(mut self, kind: io::ErrorKind, message: &str) -> Self {
        self.scan_error = Some((kind, message.to_string()));
        self
    }

    pub fn failing_reads(mut self, kind: io::ErrorKind, message: &str) -> Self {
        self.read_error = Some((kind, message.to_string()));
        self
    }

    /// `remove_file` fails and leaves the file in place.
    pub fn failing_removes(mut self, kind: io::ErrorKind, message: &str) -> Self {
        self.remove_error = Some((kind, message.to_string()));
        self
    }

    /// `remove_file` deletes the file but reports `NotFound`, as if another
    /// process removed it first.
    pub fn vanishing_removes(mut self) -> Self {
        self.vanish_on_remove = true;
        self
    }

    pub fn reads(&self) -> usize { self.reads.load(Ordering::SeqCst) }

    pub fn file_names(&self) -> Vec<String> {
        self.files
            .lock()
            .expect("files lock")
            .keys()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect()
    }

    pub fn has_dir(&self, dir: &Path) -> bool {
        self.dirs.lock().expect("dirs lock").contains(dir)
    }
}

#[async_trait]
impl FileSystem for FakeFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        if let Some((kind, message)) = &self.scan_error {
            return Err(io::Error::new(*kind, message.clone()));
        }
        if !self.has_dir(dir) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        let files = self.files.lock().expect("files lock");
        Ok(files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect())
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some((kind, message)) = &self.read_error {
            return Err(io::Error::new(*kind, message.clone()));
        }
        self.files
            .lock()
            .expect("files lock")
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let parent_exists = path.parent().is_some_and(|p| self.has_dir(p));
        if !parent_exists {
            return Err(io::Error::new(io::ErrorKind::NotFound, "parent directory missing"));
        }
        self.files.lock().expect("files lock").insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        if let Some((kind, message)) = &self.remove_error {
            return Err(io::Error::new(*kind, message.clone()));
        }
        if self.vanish_on_remove {
            self.files.lock().expect("files lock").remove(path);
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }
        self.files
            .lock()
            .expect("files lock")
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    async fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.lock().expect("dirs lock");
        for ancestor in dir.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}
