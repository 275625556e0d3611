//! HTTP handlers for the `/api/*` routes.

pub(crate) mod code;
pub(crate) mod export;
pub(crate) mod workspace;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blockly_bridge_core::{BridgeError, ErrorResponse};

/// Empty 404 for unknown paths and unsupported methods.
pub(crate) async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Any bridge failure, reported to the editor as `400 {status:"error", message}`.
#[derive(Debug)]
pub(crate) struct ApiError(pub BridgeError);

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self.0, "request rejected");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&self.0))).into_response()
    }
}
