//! Constraint-based dispatch.
//!
//! # Responsibilities
//! - Read the `ApiVersion` attached by the extractor
//! - Select the first satisfied route entry
//! - Stamp the resolved major version on the response
//! - Hand the untouched request to the selected service
//!
//! # Design Decisions
//! - Owns an `Arc<RouteTable>`; no global state
//! - Missing version is a wiring fault, surfaced as 400
//! - A passed `RequestDeadline` stops dispatch before the handler runs

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Extensions, HeaderName, HeaderValue, Request},
    response::{IntoResponse, Response},
    Router,
};
use tokio::time::Instant;
use tower::ServiceExt;

use crate::observability::metrics;
use crate::versioning::error::{SetupError, VersionError};
use crate::versioning::table::{RouteEntry, RouteTable};
use crate::versioning::version::ApiVersion;

/// Response header advertising the resolved major version.
pub const X_API_VERSION: HeaderName = HeaderName::from_static("x-api-version");

/// Point in time after which a request should no longer be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDeadline(pub Instant);

impl RequestDeadline {
    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// Catch-all service routing requests by their attached `ApiVersion`.
#[derive(Debug, Clone)]
pub struct VersionRouter {
    table: Arc<RouteTable>,
    header: HeaderName,
}

impl VersionRouter {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
            header: X_API_VERSION,
        }
    }

    /// Use a different response header name than `X-API-Version`.
    pub fn with_header(mut self, name: &str) -> Result<Self, SetupError> {
        self.header = HeaderName::try_from(name)
            .map_err(|_| SetupError::InvalidHeaderName(name.to_string()))?;
        Ok(self)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Pick the entry for the version stored in `extensions`.
    pub fn select(&self, extensions: &Extensions) -> Result<(&RouteEntry, ApiVersion), VersionError> {
        let version = extensions
            .get::<ApiVersion>()
            .cloned()
            .ok_or(VersionError::MissingContextVersion)?;

        let entry = self
            .table
            .resolve(&version)
            .ok_or_else(|| VersionError::NoConstraintSatisfied(version.to_string()))?;

        Ok((entry, version))
    }

    /// Mount as the fallback of a fresh router so every path is versioned.
    pub fn into_router(self) -> Router {
        Router::new().fallback(dispatch).with_state(self)
    }
}

async fn dispatch(State(router): State<VersionRouter>, req: Request<Body>) -> Response {
    let (entry, version) = match router.select(req.extensions()) {
        Ok(selected) => selected,
        Err(err) => {
            match &err {
                VersionError::MissingContextVersion => {
                    tracing::error!("No API version on request; is accept_version installed?")
                }
                _ => tracing::debug!(error = %err, "No route for requested version"),
            }
            metrics::record_rejection(err.kind());
            return err.into_response();
        }
    };

    if let Some(deadline) = req.extensions().get::<RequestDeadline>() {
        if deadline.has_passed() {
            let err = VersionError::DeadlineExceeded;
            tracing::warn!(version = %version, "Deadline passed before dispatch");
            metrics::record_rejection(err.kind());
            return err.into_response();
        }
    }

    tracing::debug!(
        version = %version,
        constraint = %entry.constraint,
        path = %req.uri().path(),
        "Dispatching request"
    );

    let start_time = std::time::Instant::now();
    let handler = entry.handler.clone();
    let mut response = handler
        .oneshot(req)
        .await
        .unwrap_or_else(|never: Infallible| match never {});

    response
        .headers_mut()
        .entry(router.header.clone())
        .or_insert_with(|| HeaderValue::from(version.major()));

    metrics::record_dispatch(&entry.constraint.to_string(), start_time);
    response
}
