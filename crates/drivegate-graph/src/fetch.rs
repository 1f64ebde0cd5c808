//! Content download against the direct-download URL.

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::item::DownloadTarget;

/// Outcome of a content fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The caller's validator still matches upstream content.
    NotModified,
    /// Fresh content, with the validator to hand back to the caller.
    Fetched(Content),
}

/// Downloaded file content.
#[derive(Debug, Clone)]
pub struct Content {
    /// Raw body text, re-served byte-for-byte.
    pub body: String,
    /// Validator for conditional re-requests, when upstream supplied one.
    pub etag: Option<String>,
}

/// Fetch the file content from the pre-authorized download URL.
///
/// The URL grants anonymous read access, so no Authorization header is
/// attached; redirects are followed. When `validator` is supplied it is
/// forwarded as `If-None-Match`, and an upstream 304 short-circuits.
pub(crate) async fn fetch_content(
    http: &reqwest::Client,
    config: &GraphConfig,
    target: &DownloadTarget,
    validator: Option<&str>,
) -> Result<FetchOutcome> {
    let mut request = http.get(&target.url);
    if let Some(validator) = validator {
        request = request.header(reqwest::header::IF_NONE_MATCH, validator);
    }

    let response = request
        .send()
        .await
        .map_err(|e| GraphError::Network(format!("Download request failed: {}", e)))?;

    if validator.is_some() && response.status() == reqwest::StatusCode::NOT_MODIFIED {
        return Ok(FetchOutcome::NotModified);
    }

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(GraphError::Content(format!(
            "Download failed ({}): {}",
            status, error_text
        )));
    }

    let etag = response
        .headers()
        .get(reqwest::header::ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response
        .text()
        .await
        .map_err(|e| GraphError::Content(format!("Failed to read download body: {}", e)))?;

    if config.expect_json {
        serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
            GraphError::Content(format!("Downloaded content is not valid JSON: {}", e))
        })?;
    }

    tracing::debug!(bytes = body.len(), etag = ?etag, "Fetched content");

    // The download response validator wins; fall back to the one the
    // metadata lookup reported for the item.
    Ok(FetchOutcome::Fetched(Content {
        body,
        etag: etag.or_else(|| target.etag.clone()),
    }))
}
