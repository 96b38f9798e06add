use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

pub(super) fn public_router() -> Router {
    Router::new()
        .route("/health", get(health_checker_handler))
        .route("/webhook", post(webhook_event_handler).get(webhook_status_handler))
}

async fn health_checker_handler() -> &'static str {
    "UP"
}

/// Accepts platform event notifications. The payload is logged and
/// acknowledged; no events are acted upon.
async fn webhook_event_handler(Json(payload): Json<serde_json::Value>) -> impl IntoResponse {
    info!(%payload, "Webhook event received");
    Json(serde_json::json!({ "success": true }))
}

async fn webhook_status_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}
