pub mod dto;
pub mod urls;
pub mod videos;

use axum::{Router, http, http::StatusCode, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::AppState;

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(urls::routes())
        .merge(videos::routes())
}

/// Full application router with request tracing and state attached
pub fn app(state: AppState) -> Router {
    add_tracing(build_routes()).with_state(Arc::new(state))
}

/// Add HTTP trace logging layer (request/response + latency)
fn add_tracing(router: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().path().to_string();
                tracing::span!(Level::INFO, "http", %method, %uri)
            })
            .on_response(
                |res: &http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::info!(status = %res.status(), elapsed_ms = latency.as_millis() as u64, "response");
                },
            ),
    )
}

async fn health() -> &'static str {
    "ok"
}

/// Explicit HEAD handler for routes whose GET has side effects; axum would
/// otherwise run the GET handler for HEAD.
async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
