//! URL list endpoints (/new, /list, /clr, /fetch)

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::method_not_allowed;
use crate::AppState;
use crate::models::StoredUrl;
use crate::services::error::{AppError, AppResult, LogErr};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/new", post(add_url))
        .route("/list", get(list_urls))
        .route("/clr", get(clear_urls).head(method_not_allowed))
        .route("/fetch", get(import_urls).head(method_not_allowed))
}

#[derive(Debug, Deserialize)]
struct NewUrlRequest {
    url: String,
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    imported: usize,
}

/// Accepts `application/json` with optional parameters such as `charset`
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// POST /new - Store a URL under a fresh id
async fn add_url(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<StoredUrl>)> {
    if !is_json(&headers) {
        return Err(AppError::BadRequest(
            "Content-Type must be application/json".to_string(),
        ));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("Empty request body".to_string()));
    }

    let request: NewUrlRequest = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Invalid request payload".to_string()))?;

    if request.url.trim().is_empty() {
        return Err(AppError::BadRequest("URL must not be empty".to_string()));
    }

    let record = state
        .store
        .add(&request.url)
        .await
        .log_500("Error adding URL to database")?;

    tracing::info!(id = %record.id, url = %record.url, "stored URL");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /list - Every stored URL
async fn list_urls(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<StoredUrl>>> {
    let urls = state
        .store
        .list_all()
        .await
        .log_500("Error retrieving URLs from database")?;

    Ok(Json(urls))
}

/// GET /clr - Delete every stored URL
async fn clear_urls(State(state): State<Arc<AppState>>) -> AppResult<String> {
    let removed = state
        .store
        .clear_all()
        .await
        .log_500("Error clearing URLs from database")?;

    tracing::info!(removed, "cleared URL store");
    Ok(format!("All URLs cleared ({} removed)", removed))
}

/// GET /fetch - Bulk import from the configured list endpoint
async fn import_urls(State(state): State<Arc<AppState>>) -> AppResult<Json<ImportResponse>> {
    let importer = state.importer.as_ref().ok_or_else(|| {
        AppError::Unavailable("URL import source is not configured".to_string())
    })?;

    let imported = importer
        .import_into(state.store.as_ref())
        .await
        .log_500_with_cause("Error importing URLs")?;

    Ok(Json(ImportResponse { imported }))
}
