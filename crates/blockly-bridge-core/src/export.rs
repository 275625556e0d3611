//! Generated-source slot: text from the editor written verbatim to the firmware entry point.

use crate::error::{BridgeError, BridgeResult};
use crate::slot::FileSlot;
use std::path::{Path, PathBuf};

/// What an export wrote and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    /// Byte length of the written text.
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct SourceExporter {
    slot: FileSlot,
}

impl SourceExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            slot: FileSlot::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.slot.path()
    }

    /// Overwrite the target with `code`. Empty code is rejected before the file is touched.
    pub async fn export(&self, code: &str) -> BridgeResult<ExportReceipt> {
        if code.is_empty() {
            return Err(BridgeError::MissingCode);
        }
        self.slot.write(code.as_bytes()).await?;
        Ok(ExportReceipt {
            path: self.slot.path().to_path_buf(),
            size: code.len(),
        })
    }
}
