//! Static configuration for the Graph pipeline.

use std::fmt;
use std::time::Duration;

use crate::item::ItemSource;

/// Default base URL of the Microsoft identity platform.
pub const DEFAULT_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

/// Default base URL of the Microsoft Graph API.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Default per-request transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth2 client-credentials set. Immutable for the process lifetime.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// SharePoint site and drive the file lives in.
///
/// Unused by the sharing-URL mode, which addresses the item directly.
#[derive(Debug, Clone)]
pub struct DriveLocation {
    pub site_id: String,
    pub drive_id: String,
}

/// Configuration for the Graph pipeline.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Client credentials for the token exchange.
    pub credentials: Credentials,

    /// Site/drive identifiers for the id and path reference modes.
    pub drive: DriveLocation,

    /// The configured file reference (at most one mode set).
    pub source: ItemSource,

    /// Base URL of the identity provider's token endpoint.
    pub login_base_url: String,

    /// Base URL of the Graph API.
    pub graph_base_url: String,

    /// Transport timeout applied to every upstream call.
    pub timeout: Duration,

    /// Reject downloaded content that does not parse as JSON.
    pub expect_json: bool,
}

impl GraphConfig {
    /// Create a config pointing at the production Microsoft endpoints.
    pub fn new(credentials: Credentials, drive: DriveLocation, source: ItemSource) -> Self {
        Self {
            credentials,
            drive,
            source,
            login_base_url: DEFAULT_LOGIN_BASE_URL.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            expect_json: true,
        }
    }

    /// Override the identity provider base URL.
    pub fn with_login_base_url(mut self, url: impl Into<String>) -> Self {
        self.login_base_url = url.into();
        self
    }

    /// Override the Graph API base URL.
    pub fn with_graph_base_url(mut self, url: impl Into<String>) -> Self {
        self.graph_base_url = url.into();
        self
    }

    /// Set the upstream transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable JSON validation of downloaded content.
    pub fn with_expect_json(mut self, expect: bool) -> Self {
        self.expect_json = expect;
        self
    }
}
