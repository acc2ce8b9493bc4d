//! Object storage boundary for persisted form state.
//!
//! The form stores survive restarts as small JSON objects. The trait keeps
//! handlers and the persistence worker independent of where those objects
//! live; the default implementation writes to a local data directory.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

#[async_trait]
pub trait ObjectStorage {
    async fn upload_file(&self, filename: &str, data: &[u8]) -> Result<(), String>;
    /// Returns `Ok(None)` when the object does not exist.
    async fn download_file(&self, filename: &str) -> Result<Option<Vec<u8>>, String>;
}

/// Filesystem-backed storage rooted at a data directory.
pub struct LocalObjectStorage {
    root: PathBuf,
}

impl LocalObjectStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload_file(&self, filename: &str, data: &[u8]) -> Result<(), String> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| format!("failed to create data directory: {e}"))?;
        fs::write(self.path_for(filename), data)
            .await
            .map_err(|e| format!("failed to write {filename}: {e}"))
    }

    async fn download_file(&self, filename: &str) -> Result<Option<Vec<u8>>, String> {
        match fs::read(self.path_for(filename)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("failed to read {filename}: {e}")),
        }
    }
}
