//! GET /health - liveness check

use axum::{http::StatusCode, response::Response};
use serde_json::json;
use std::sync::Arc;

use super::json_response;
use crate::state::AppState;

/// Always returns 200 OK while the process is alive.
pub async fn health() -> Response {
    json_response(
        StatusCode::OK,
        &json!({ "status": "ok", "service": "netpol-gateway" }),
    )
}

/// Build the health router sub-tree
pub fn health_router() -> axum::Router<Arc<AppState>> {
    use axum::routing::get;
    axum::Router::new().route("/health", get(health))
}
