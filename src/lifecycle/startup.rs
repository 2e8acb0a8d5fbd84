//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the server (route table compiled here, so bad config aborts)
//! - Start the optional metrics endpoint
//! - Bind the listener last, so traffic only arrives once ready

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::versioning::SetupError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the server and bind its listener.
pub async fn start(config: ServerConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let bind_address = config.listener.bind_address.clone();
    let metrics_address = config
        .observability
        .metrics_enabled
        .then(|| config.observability.metrics_address.parse::<SocketAddr>());

    let server = HttpServer::new(config)?;

    match metrics_address {
        Some(Ok(addr)) => metrics::init_metrics(addr),
        Some(Err(e)) => tracing::error!(error = %e, "Failed to parse metrics address"),
        None => {}
    }

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    Ok((server, listener))
}
