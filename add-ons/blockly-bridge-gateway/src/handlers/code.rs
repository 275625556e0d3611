//! `/api/code`: endpoint discovery and the generate stub.

use super::ApiError;
use axum::body::Bytes;
use axum::Json;
use blockly_bridge_core::{CodeInfo, GenerateAck, GenerateRequest};

/// GET /api/code – describe the available endpoints.
pub(crate) async fn code_info() -> Json<CodeInfo> {
    Json(CodeInfo::current())
}

/// POST /api/code – acknowledge only; Blockly generates the Arduino code in the browser.
pub(crate) async fn generate_code(body: Bytes) -> Result<Json<GenerateAck>, ApiError> {
    let request = GenerateRequest::from_body(&body)?;
    tracing::debug!(
        xml_bytes = request.blockly_xml.as_deref().map_or(0, str::len),
        "generate requested; returning browser-side instructions"
    );
    Ok(Json(GenerateAck::new()))
}
