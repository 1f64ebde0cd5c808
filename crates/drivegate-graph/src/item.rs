//! File-reference selection and drive-item resolution.
//!
//! A deployment identifies its file in exactly one of three ways: an
//! opaque drive-item id, a root-relative file path, or a sharing URL.
//! Each mode maps to a different Graph metadata endpoint; all three
//! yield the same thing, a short-lived direct-download URL.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

use crate::config::{DriveLocation, GraphConfig};
use crate::error::{GraphError, Result};

/// Fields requested from the metadata endpoint.
const SELECT: &str = "$select=@microsoft.graph.downloadUrl,eTag";

/// The three mutually exclusive file-reference modes, as configured.
///
/// Values are normalized on construction: empty and whitespace-only
/// strings count as unset, matching how deployments leave variables
/// blank rather than unsetting them.
#[derive(Debug, Clone, Default)]
pub struct ItemSource {
    pub item_id: Option<String>,
    pub file_path: Option<String>,
    pub share_url: Option<String>,
}

impl ItemSource {
    pub fn new(
        item_id: Option<String>,
        file_path: Option<String>,
        share_url: Option<String>,
    ) -> Self {
        Self {
            item_id: normalize(item_id),
            file_path: normalize(file_path),
            share_url: normalize(share_url),
        }
    }

    /// Collapse the option set into a single reference.
    ///
    /// Exactly one mode must be set; zero or multiple set modes are a
    /// configuration error, reported before any network call is made.
    pub fn select(&self) -> Result<ItemRef> {
        let mut selected = None;
        let mut count = 0;

        if let Some(id) = &self.item_id {
            selected = Some(ItemRef::ItemId(id.clone()));
            count += 1;
        }
        if let Some(path) = &self.file_path {
            selected = Some(ItemRef::FilePath(path.clone()));
            count += 1;
        }
        if let Some(url) = &self.share_url {
            selected = Some(ItemRef::ShareUrl(url.clone()));
            count += 1;
        }

        match (count, selected) {
            (1, Some(item)) => Ok(item),
            (0, _) => Err(GraphError::Config(
                "no file reference configured: set one of item id, file path, or share URL"
                    .to_string(),
            )),
            _ => Err(GraphError::Config(
                "conflicting file references: item id, file path, and share URL are mutually exclusive"
                    .to_string(),
            )),
        }
    }

    /// Human-readable label of the active mode, for the health probe.
    ///
    /// Mirrors the selection precedence; `none` when nothing is set.
    pub fn mode_label(&self) -> &'static str {
        if self.item_id.is_some() {
            "item-id"
        } else if self.file_path.is_some() {
            "file-path"
        } else if self.share_url.is_some() {
            "share-url"
        } else {
            "none"
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// A single selected file reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    /// Opaque drive-item id.
    ItemId(String),
    /// Root-relative file path; must begin with `/`.
    FilePath(String),
    /// Sharing URL, addressed via the Graph shares endpoint.
    ShareUrl(String),
}

impl ItemRef {
    /// Build the metadata-query URL for this reference mode.
    pub fn metadata_url(&self, graph_base_url: &str, drive: &DriveLocation) -> String {
        match self {
            ItemRef::ItemId(id) => format!(
                "{}/sites/{}/drives/{}/items/{}?{}",
                graph_base_url, drive.site_id, drive.drive_id, id, SELECT
            ),
            ItemRef::FilePath(path) => format!(
                "{}/sites/{}/drives/{}/root:{}?{}",
                graph_base_url, drive.site_id, drive.drive_id, path, SELECT
            ),
            ItemRef::ShareUrl(url) => format!(
                "{}/shares/{}/driveItem?{}",
                graph_base_url,
                encode_share_token(url),
                SELECT
            ),
        }
    }
}

/// Encode a sharing URL as a Graph share token.
///
/// Graph expects the URL base64url-encoded with padding stripped and a
/// `u!` prefix.
pub fn encode_share_token(share_url: &str) -> String {
    format!("u!{}", URL_SAFE_NO_PAD.encode(share_url.as_bytes()))
}

/// A resolved download reference: the pre-authorized URL plus the item
/// validator when the metadata response carried one.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    pub url: String,
    pub etag: Option<String>,
}

/// Drive-item metadata response, projected down to what the proxy needs.
#[derive(Debug, Deserialize)]
struct DriveItem {
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    download_url: Option<String>,
    #[serde(rename = "eTag")]
    etag: Option<String>,
}

/// Resolve a file reference to its direct-download URL.
pub(crate) async fn resolve_item(
    http: &reqwest::Client,
    config: &GraphConfig,
    token: &str,
    item: &ItemRef,
) -> Result<DownloadTarget> {
    let url = item.metadata_url(&config.graph_base_url, &config.drive);

    let response = http
        .get(&url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| GraphError::Network(format!("Item lookup request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(GraphError::Lookup(format!(
            "Item lookup failed ({}): {}",
            status, error_text
        )));
    }

    let item: DriveItem = response
        .json()
        .await
        .map_err(|e| GraphError::Lookup(format!("Failed to parse item response: {}", e)))?;

    let download_url = item.download_url.ok_or_else(|| {
        GraphError::Lookup("No download URL in item response".to_string())
    })?;

    tracing::debug!(etag = ?item.etag, "Resolved download URL");

    Ok(DownloadTarget {
        url: download_url,
        etag: item.etag,
    })
}
