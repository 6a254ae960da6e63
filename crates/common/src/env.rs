//! Environment/runtime helpers
//!
//! Sanity checks on the storage directory at startup.

use std::path::Path;

use tracing::debug;

/// Check the storage directory without creating it.
///
/// A missing directory is not an error: loading from it reports "no store", and
/// saving creates it. Returns whether the directory currently exists.
pub async fn check_data_dir(data_dir: &Path) -> anyhow::Result<bool> {
    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.is_dir() => {
            debug!(data_dir = %data_dir.display(), "storage directory present");
            Ok(true)
        }
        Ok(_) => Err(anyhow::anyhow!("{} exists but is not a directory", data_dir.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(data_dir = %data_dir.display(), "storage directory not found");
            Ok(false)
        }
        Err(e) => Err(anyhow::anyhow!("cannot inspect {}: {e}", data_dir.display())),
    }
}
