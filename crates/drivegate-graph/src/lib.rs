//! Microsoft Graph upstream client for drivegate.
//!
//! Implements the three-step pipeline behind every proxied request:
//!
//! 1. Exchange static client credentials for a bearer token.
//! 2. Resolve the configured file reference (item id, file path, or
//!    sharing URL) to a time-limited direct-download URL.
//! 3. Fetch the file content, honoring conditional-request validators.
//!
//! Nothing here outlives a single request: tokens are not cached and the
//! download URL is used once. Concurrent requests share only the
//! immutable [`GraphConfig`] and the underlying `reqwest` connection pool.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod item;

mod token;

pub use client::GraphClient;
pub use config::{Credentials, DriveLocation, GraphConfig};
pub use error::{GraphError, Result};
pub use fetch::{Content, FetchOutcome};
pub use item::{DownloadTarget, ItemRef, ItemSource, encode_share_token};
