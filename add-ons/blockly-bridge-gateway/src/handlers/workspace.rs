//! `/api/workspace/*`: the single saved editor workspace.

use super::ApiError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use blockly_bridge_core::{BridgeError, LoadResponse, SaveResponse};

/// POST /api/workspace/save – persist any JSON body as-is.
pub(crate) async fn save_workspace(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveResponse>, ApiError> {
    let document: serde_json::Value = serde_json::from_slice(&body).map_err(BridgeError::from)?;
    state.workspace.save(&document).await?;
    tracing::info!(file = %state.workspace.path().display(), "Workspace saved");
    Ok(Json(SaveResponse::saved(state.workspace.path())))
}

/// GET /api/workspace/load – the saved document, or `workspace: null` before the first save.
pub(crate) async fn load_workspace(
    State(state): State<AppState>,
) -> Result<Json<LoadResponse>, ApiError> {
    let workspace = state.workspace.load().await?;
    Ok(Json(LoadResponse::new(workspace)))
}
