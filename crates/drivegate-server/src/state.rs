//! Application state shared across handlers.

use std::sync::Arc;

use drivegate_graph::GraphClient;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Everything in here is immutable after startup; concurrent requests
/// share no other state.
#[derive(Clone)]
pub struct AppState {
    /// Upstream Graph client.
    pub graph: Arc<GraphClient>,

    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(graph: GraphClient, config: ServerConfig) -> Self {
        Self {
            graph: Arc::new(graph),
            config: Arc::new(config),
        }
    }
}
