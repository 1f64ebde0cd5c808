//! The proxied data route.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::Response,
};

use drivegate_graph::FetchOutcome;

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Run the token/resolve/fetch pipeline and shape the response.
///
/// The caller's `If-None-Match` validator is forwarded upstream; a still
/// matching validator yields a 304 with an empty body. Fresh content is
/// re-served byte-for-byte with short-lived caching headers.
pub async fn data_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response> {
    let validator = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match state.graph.fetch(validator.as_deref()).await? {
        FetchOutcome::NotModified => Response::builder()
            .status(StatusCode::NOT_MODIFIED)
            .body(Body::empty())
            .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e))),

        FetchOutcome::Fetched(content) => {
            let mut builder = Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "application/json")
                .header(
                    header::CACHE_CONTROL,
                    format!("public, max-age={}", state.config.cache_max_age),
                );

            if let Some(etag) = &content.etag {
                builder = builder.header(header::ETAG, etag);
            }

            builder
                .body(Body::from(content.body))
                .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))
        }
    }
}
