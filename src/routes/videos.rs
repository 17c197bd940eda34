use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;

use super::dto::VideoDataResponse;
use super::method_not_allowed;
use crate::AppState;
use crate::services::error::{AppResult, LogErr};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/get", get(random_video).head(method_not_allowed))
}

/// GET /get - Pick a stored URL at random and return its normalized video data
async fn random_video(State(state): State<Arc<AppState>>) -> AppResult<Json<VideoDataResponse>> {
    let url = state
        .store
        .pick_random()
        .await
        .log_500_with_cause("Error fetching random URL")?;

    tracing::info!(%url, "fetching video");

    let video = state
        .videos
        .fetch(&url)
        .await
        .log_500_with_cause("Error fetching video")?;

    Ok(Json(VideoDataResponse::from(video)))
}
