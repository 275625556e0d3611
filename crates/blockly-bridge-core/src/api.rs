//! JSON envelopes exchanged with the Blockly editor.
//!
//! Request bodies are parsed from raw bytes rather than through a typed extractor: the editor
//! does not always send a JSON content type, and the workspace body is an arbitrary document.

use crate::error::{BridgeError, BridgeResult};
use crate::export::ExportReceipt;
use serde::Serialize;
use serde_json::Value;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

fn parse_object(body: &[u8]) -> BridgeResult<serde_json::Map<String, Value>> {
    match serde_json::from_slice(body)? {
        Value::Object(map) => Ok(map),
        _ => Err(BridgeError::ExpectedObject),
    }
}

// ---------------------------------------------------------------------------
// GET /api/code
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Endpoints {
    #[serde(rename = "POST /api/code")]
    pub generate: &'static str,
    #[serde(rename = "POST /api/export")]
    pub export: &'static str,
    #[serde(rename = "POST /api/workspace/save")]
    pub save: &'static str,
    #[serde(rename = "GET /api/workspace/load")]
    pub load: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeInfo {
    pub status: &'static str,
    pub message: &'static str,
    pub endpoints: Endpoints,
}

impl CodeInfo {
    pub fn current() -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: "To get generated code, use POST /api/code with Blockly XML",
            endpoints: Endpoints {
                generate: "Send Blockly workspace XML to generate Arduino code",
                export: "Export generated code to src/main.cpp",
                save: "Save Blockly workspace",
                load: "Load saved Blockly workspace",
            },
        }
    }
}

// ---------------------------------------------------------------------------
// POST /api/code
// ---------------------------------------------------------------------------

/// Body of `POST /api/code`. Code generation happens in the browser; the XML is only logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    pub blockly_xml: Option<String>,
}

impl GenerateRequest {
    pub fn from_body(body: &[u8]) -> BridgeResult<Self> {
        let map = parse_object(body)?;
        Ok(Self {
            blockly_xml: map
                .get("blocklyXml")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateAck {
    pub status: &'static str,
    pub message: &'static str,
    pub note: &'static str,
    pub instructions: [&'static str; 3],
}

impl GenerateAck {
    pub fn new() -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: "Code generated successfully",
            note: "Blockly generates code in the browser. The generated code is shown in the right panel.",
            instructions: [
                "1. Copy the generated code from the right panel",
                "2. Click \"Export to Arduino\" button to save to src/main.cpp",
                "3. Or use POST /api/export with the code",
            ],
        }
    }
}

impl Default for GenerateAck {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// POST /api/export
// ---------------------------------------------------------------------------

/// Body of `POST /api/export`: `{ "code": "<non-empty string>" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub code: String,
}

impl ExportRequest {
    /// Missing, empty, or non-string `code` is [`BridgeError::MissingCode`].
    pub fn from_body(body: &[u8]) -> BridgeResult<Self> {
        let map = parse_object(body)?;
        match map.get("code").and_then(Value::as_str) {
            Some(code) if !code.is_empty() => Ok(Self {
                code: code.to_owned(),
            }),
            _ => Err(BridgeError::MissingCode),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub status: &'static str,
    pub message: String,
    pub file: String,
    pub size: usize,
    pub next_steps: [&'static str; 2],
}

impl ExportResponse {
    pub fn from_receipt(receipt: &ExportReceipt) -> Self {
        let file = receipt.path.display().to_string();
        Self {
            status: STATUS_SUCCESS,
            message: format!("Code exported successfully to {file}"),
            file,
            size: receipt.size,
            next_steps: ["Run: pio run -t upload", "Or: platformio run -t upload"],
        }
    }
}

// ---------------------------------------------------------------------------
// /api/workspace/{save,load}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub file: String,
}

impl SaveResponse {
    pub fn saved(file: &std::path::Path) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: "Workspace saved",
            file: file.display().to_string(),
        }
    }
}

/// `workspace` serializes as `null` until the first save.
#[derive(Debug, Clone, Serialize)]
pub struct LoadResponse {
    pub status: &'static str,
    pub workspace: Option<Value>,
}

impl LoadResponse {
    pub fn new(workspace: Option<Value>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            workspace,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl From<&BridgeError> for ErrorResponse {
    fn from(err: &BridgeError) -> Self {
        Self {
            status: STATUS_ERROR,
            message: err.to_string(),
        }
    }
}
