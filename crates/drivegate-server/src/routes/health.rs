//! Liveness endpoints.
//!
//! Both routes answer 200 regardless of upstream configuration validity,
//! so orchestrators can probe the process without credentials.

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Active file-reference mode (`item-id`, `file-path`, `share-url`,
    /// or `none` when misconfigured).
    pub mode: String,
}

/// Plain-text liveness probe.
pub async fn root() -> &'static str {
    "OK"
}

/// Health check with the configured reference mode.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: state.graph.config().source.mode_label().to_string(),
    })
}

/// Create liveness routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
