//! version-router
//!
//! Serves the versioned resource API.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ request id → trace → timeout → deadline
//!                                                        │
//!                                                        ▼
//!                                        ┌──────────────────────────┐
//!                                        │ accept_version           │── 406
//!                                        │ (Accept → ApiVersion)    │
//!                                        └────────────┬─────────────┘
//!                                                     ▼
//!                                        ┌──────────────────────────┐
//!                                        │ VersionRouter            │── 400 / 404 / 408
//!                                        │ (RouteTable, first match)│
//!                                        └────────────┬─────────────┘
//!                                                     ▼
//!     Client Response ◀──── X-API-Version ──── services::v1 | services::v2
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use version_router::config::{load_config, ServerConfig};
use version_router::lifecycle::{self, signals, Shutdown};
use version_router::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "version-router")]
#[command(about = "Serve an API versioned through the Accept header", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener port.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    if let Some(port) = cli.port {
        let mut addr: SocketAddr = config.listener.bind_address.parse()?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }

    init_logging(&config.observability);

    tracing::info!("version-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        vendor = %config.versioning.vendor,
        routes = config.routes.0.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let (server, listener) = lifecycle::start(config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::watch(shutdown));

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
