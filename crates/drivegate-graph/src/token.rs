//! OAuth2 client-credentials exchange against the Microsoft identity
//! platform.

use serde::Deserialize;

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};

/// Scope requested for application-permission Graph access.
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// Build the tenant-specific token endpoint URL.
fn token_url(login_base_url: &str, tenant_id: &str) -> String {
    format!("{}/{}/oauth2/v2.0/token", login_base_url, tenant_id)
}

/// Exchange client credentials for a bearer token.
///
/// Tokens are not cached; every proxied request performs a fresh
/// exchange and relies on the provider-side expiry.
pub(crate) async fn acquire_token(http: &reqwest::Client, config: &GraphConfig) -> Result<String> {
    let url = token_url(&config.login_base_url, &config.credentials.tenant_id);

    let response = http
        .post(&url)
        .form(&[
            ("client_id", config.credentials.client_id.as_str()),
            ("client_secret", config.credentials.client_secret.as_str()),
            ("scope", GRAPH_SCOPE),
            ("grant_type", "client_credentials"),
        ])
        .send()
        .await
        .map_err(|e| GraphError::Network(format!("Token request failed: {}", e)))?;

    if !response.status().is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(GraphError::Auth(format!(
            "Token exchange failed: {}",
            error_text
        )));
    }

    let tokens: TokenResponse = response
        .json()
        .await
        .map_err(|e| GraphError::Auth(format!("Failed to parse token response: {}", e)))?;

    tracing::debug!(expires_in = tokens.expires_in, "Acquired bearer token");

    Ok(tokens.access_token)
}
