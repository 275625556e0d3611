//! `/api/export`: write generated source to the firmware entry point.

use super::ApiError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use blockly_bridge_core::{ExportRequest, ExportResponse};

/// POST /api/export – overwrite the export target with `code`, verbatim.
pub(crate) async fn export_code(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExportResponse>, ApiError> {
    let request = ExportRequest::from_body(&body)?;
    let receipt = state.exporter.export(&request.code).await?;
    tracing::info!(
        file = %receipt.path.display(),
        size = receipt.size,
        "Code exported"
    );
    Ok(Json(ExportResponse::from_receipt(&receipt)))
}
