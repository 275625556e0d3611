//! blockly-bridge-core: configuration, single-slot file stores, and the JSON envelopes
//! exchanged with the Blockly editor.
//!
//! The gateway add-on owns HTTP; everything that touches disk or defines a payload lives here.

mod api;
mod config;
mod error;
mod export;
mod slot;
mod workspace;

pub use api::{
    CodeInfo, Endpoints, ErrorResponse, ExportRequest, ExportResponse, GenerateAck,
    GenerateRequest, LoadResponse, SaveResponse, STATUS_ERROR, STATUS_SUCCESS,
};
pub use config::{BridgeConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, ENV_PREFIX};
pub use error::{BridgeError, BridgeResult};
pub use export::{ExportReceipt, SourceExporter};
pub use slot::FileSlot;
pub use workspace::WorkspaceStore;
