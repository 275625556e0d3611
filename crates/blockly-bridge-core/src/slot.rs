//! Single-slot file store: one fixed key, backed by one file on disk.
//!
//! Writes are whole-buffer and truncate; there is no cross-request locking, so the
//! last writer wins.

use crate::error::{BridgeError, BridgeResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents, or `None` when nothing has been written yet.
    pub async fn read(&self) -> BridgeResult<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BridgeError::io(&self.path)(e)),
        }
    }

    /// Replace the contents, creating parent directories as needed.
    pub async fn write(&self, bytes: &[u8]) -> BridgeResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::io(parent))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(BridgeError::io(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_slot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("never-written.json"));
        assert!(slot.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_creates_parents_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested/deeper/slot.txt"));

        slot.write(b"a much longer first payload").await.unwrap();
        slot.write(b"short").await.unwrap();

        assert_eq!(slot.read().await.unwrap().as_deref(), Some(&b"short"[..]));
    }

    #[tokio::test]
    async fn unreadable_slot_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be: reading it is an I/O error, not "absent".
        let slot = FileSlot::new(dir.path());
        let err = slot.read().await.unwrap_err();
        assert!(matches!(err, BridgeError::Io { ref path, .. } if path == dir.path()));
    }
}
