//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile the route table from configuration (fail fast)
//! - Wire up middleware (tracing, timeout, request ID, deadline)
//! - Mount the version extractor and router as the catch-all
//! - Serve until the shutdown signal fires

use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{stamp_deadline, X_REQUEST_ID};
use crate::services;
use crate::versioning::{self, SetupError, VendorToken, VersionRouter};

/// HTTP server for the versioned API.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if any route constraint, service name, vendor token or header
    /// name is invalid; nothing is bound in that case.
    pub fn new(config: ServerConfig) -> Result<Self, SetupError> {
        let table = services::route_table(&config.routes)?;
        let vendor = VendorToken::new(&config.versioning.vendor)?;
        let version_router =
            VersionRouter::new(table).with_header(&config.versioning.response_header)?;

        for entry in version_router.table().entries() {
            tracing::info!(
                constraint = %entry.constraint,
                expression = entry.constraint.expression(),
                "Registered versioned route"
            );
        }

        let router = Self::build_router(&config, vendor, version_router);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, vendor: VendorToken, version_router: VersionRouter) -> Router {
        let timeout = Duration::from_secs(config.timeouts.request_secs);

        versioning::versioned(vendor, version_router)
            .layer(middleware::from_fn_with_state(timeout, stamp_deadline))
            .layer(TimeoutLayer::new(timeout))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            vendor = %self.config.versioning.vendor,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
