//! Error types for the Graph pipeline.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while resolving and fetching the upstream file.
///
/// Each variant corresponds to one stage of the pipeline, so the HTTP
/// facade can pick a status code without inspecting message text.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Missing or conflicting file-reference configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// Token exchange failed.
    #[error("Auth error: {0}")]
    Auth(String),

    /// Item lookup failed or returned an unusable response.
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Content download failed or the body was unparsable.
    #[error("Content error: {0}")]
    Content(String),

    /// Network/HTTP transport error.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for GraphError {
    fn from(e: reqwest::Error) -> Self {
        GraphError::Network(e.to_string())
    }
}
