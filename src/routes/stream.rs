//! Single stream lookup (/api/v1/stream/{platform}/{id})

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{Platform, StreamResponse};
use crate::services::error::{ApiError, LogErr};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/stream/{platform}/{id}", get(get_stream))
        .route("/api/v1/stream/{platform}", get(missing_stream_id))
        .route("/api/v1/stream/{platform}/", get(missing_stream_id))
}

/// GET /api/v1/stream/{platform}/{id} - `id` is a video ID for YouTube and a
/// channel slug for Kick. Every lookup failure is reported as 404.
async fn get_stream(
    State(state): State<Arc<AppState>>,
    Path((platform, stream_id)): Path<(String, String)>,
) -> Result<Json<StreamResponse>, ApiError> {
    if stream_id.trim().is_empty() {
        return Err(ApiError::bad_request("stream ID is required"));
    }

    let platform = Platform::from_tag(&platform)
        .ok_or_else(|| ApiError::bad_request("invalid platform: must be youtube or kick"))?;

    let streamer = match platform {
        Platform::YouTube => state.youtube.get_stream_info(&stream_id).await,
        Platform::Kick => state.kick.get_channel_info(&stream_id).await,
    }
    .log_status(
        &format!("{} stream lookup for {:?} failed", platform, stream_id),
        StatusCode::NOT_FOUND,
    )?;

    Ok(Json(StreamResponse::from(streamer)))
}

async fn missing_stream_id() -> ApiError {
    ApiError::bad_request("stream ID is required")
}
