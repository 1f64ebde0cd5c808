//! Error types for the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use drivegate_graph::GraphError;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Upstream pipeline failure.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Failures past the lookup stage are the upstream file host's.
            ServerError::Graph(GraphError::Content(_)) | ServerError::Graph(GraphError::Network(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ServerError::Graph(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();

        match &self {
            ServerError::Graph(GraphError::Config(_)) => {
                tracing::warn!(status = %status, error = %message, "Request failed");
            }
            _ => {
                tracing::error!(status = %status, error = %message, "Request failed");
            }
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
