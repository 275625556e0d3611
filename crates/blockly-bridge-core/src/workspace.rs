//! Workspace document slot. The document is opaque JSON; its shape is never inspected.

use crate::error::BridgeResult;
use crate::slot::FileSlot;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    slot: FileSlot,
}

impl WorkspaceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            slot: FileSlot::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.slot.path()
    }

    /// Re-encode and persist `document`, replacing any previous save.
    pub async fn save(&self, document: &Value) -> BridgeResult<()> {
        let bytes = serde_json::to_vec(document)?;
        self.slot.write(&bytes).await
    }

    /// The last saved document; `None` before the first save.
    pub async fn load(&self) -> BridgeResult<Option<Value>> {
        match self.slot.read().await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
