//! drivegate - serve one Graph-hosted file over HTTP.
//!
//! Main entry point: parses flags (with environment fallbacks), boots
//! tracing, and runs the HTTP facade.

use std::net::{IpAddr, SocketAddr};

use anyhow::Result;
use clap::Parser;

use drivegate_graph::{Credentials, DriveLocation, GraphClient, GraphConfig, ItemSource};
use drivegate_server::{Server, ServerConfig};

/// drivegate - serve one Graph-hosted file over HTTP
#[derive(Parser)]
#[command(name = "drivegate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory (Entra) tenant id
    #[arg(long, env = "TENANT_ID")]
    pub tenant_id: String,

    /// Application client id
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: String,

    /// Application client secret
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// SharePoint site id
    #[arg(long, env = "SITE_ID")]
    pub site_id: String,

    /// Drive id within the site
    #[arg(long, env = "DRIVE_ID")]
    pub drive_id: String,

    /// Drive-item id of the file (mutually exclusive with the other
    /// reference modes)
    #[arg(long, env = "ITEM_ID")]
    pub item_id: Option<String>,

    /// Root-relative path of the file, starting with `/`
    #[arg(long, env = "FILE_PATH")]
    pub file_path: Option<String>,

    /// Sharing URL of the file
    #[arg(long, env = "SHARE_URL")]
    pub share_url: Option<String>,

    /// Cache-Control max-age for proxied content, in seconds
    #[arg(long, env = "CACHE_MAX_AGE", default_value_t = 60)]
    pub cache_max_age: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "drivegate=debug,drivegate_graph=debug,drivegate_server=debug,tower_http=debug,info"
    } else {
        "drivegate=info,drivegate_graph=info,drivegate_server=info,warn"
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let credentials = Credentials {
        tenant_id: cli.tenant_id,
        client_id: cli.client_id,
        client_secret: cli.client_secret,
    };
    let drive = DriveLocation {
        site_id: cli.site_id,
        drive_id: cli.drive_id,
    };
    let source = ItemSource::new(cli.item_id, cli.file_path, cli.share_url);

    // Liveness must work even when the file reference is wrong, so a bad
    // mode set is reported here but does not stop the server.
    if let Err(e) = source.select() {
        tracing::warn!(error = %e, "File reference not usable; data routes will fail");
    }

    let graph = GraphClient::new(GraphConfig::new(credentials, drive, source))?;

    let addr = SocketAddr::new(cli.bind, cli.port);
    let config = ServerConfig::default()
        .with_bind_address(addr)
        .with_cache_max_age(cli.cache_max_age);

    tracing::info!(
        addr = %addr,
        mode = graph.config().source.mode_label(),
        "Starting drivegate"
    );

    Server::new(graph, config).run().await?;

    Ok(())
}
