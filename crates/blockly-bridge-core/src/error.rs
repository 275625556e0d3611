//! Error types for the Blockly bridge

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Everything a request or startup step can fail with.
///
/// The HTTP layer reports every variant as a client error; there is no separate server-fault tier.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("No code provided")]
    MissingCode,

    #[error("Expected a JSON object body")]
    ExpectedObject,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl BridgeError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BridgeError::Io { path, source }
    }
}
