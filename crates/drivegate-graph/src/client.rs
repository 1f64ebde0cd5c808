//! Graph client bundling the HTTP client with pipeline configuration.

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::fetch::{self, FetchOutcome};
use crate::item::{self, DownloadTarget, ItemRef};
use crate::token;

/// Client for the token/resolve/fetch pipeline.
///
/// Cheap to share: handlers hold it behind an `Arc` and the inner
/// `reqwest::Client` pools connections across requests.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    config: GraphConfig,
}

impl GraphClient {
    /// Create a client from pipeline configuration.
    pub fn new(config: GraphConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GraphError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Access the pipeline configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Exchange client credentials for a bearer token.
    pub async fn acquire_token(&self) -> Result<String> {
        token::acquire_token(&self.http, &self.config).await
    }

    /// Resolve a file reference to its direct-download URL.
    pub async fn resolve_item(&self, token: &str, item: &ItemRef) -> Result<DownloadTarget> {
        item::resolve_item(&self.http, &self.config, token, item).await
    }

    /// Fetch content from a resolved download target.
    pub async fn fetch_content(
        &self,
        target: &DownloadTarget,
        validator: Option<&str>,
    ) -> Result<FetchOutcome> {
        fetch::fetch_content(&self.http, &self.config, target, validator).await
    }

    /// Run the full pipeline for one proxied request.
    ///
    /// The reference-mode invariant is checked first, so a misconfigured
    /// deployment fails before any network call.
    pub async fn fetch(&self, validator: Option<&str>) -> Result<FetchOutcome> {
        let item = self.config.source.select()?;
        let token = self.acquire_token().await?;
        let target = self.resolve_item(&token, &item).await?;
        self.fetch_content(&target, validator).await
    }
}
