//! Version extraction middleware.
//! Parses the `Accept` header and attaches the requested `ApiVersion`.

use std::fmt;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::ACCEPT, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::observability::metrics;
use crate::versioning::error::SetupError;
use crate::versioning::media_type::parse_accept;

/// Vendor media type token the `Accept` header must name, e.g. `vnd.api+json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorToken(Arc<str>);

impl VendorToken {
    pub fn new(token: impl AsRef<str>) -> Result<Self, SetupError> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(SetupError::EmptyVendor);
        }
        Ok(Self(Arc::from(token)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Middleware that resolves the requested API version.
///
/// Use with `axum::middleware::from_fn_with_state(vendor, accept_version)`.
/// Requests without a usable `Accept` header are answered with 406 and never
/// reach the inner service.
pub async fn accept_version(
    State(vendor): State<VendorToken>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let accept = req
        .headers()
        .get(ACCEPT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    match parse_accept(accept, vendor.as_str()) {
        Ok(version) => {
            tracing::debug!(accept = %accept, version = %version, "Resolved API version");
            req.extensions_mut().insert(version);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(accept = %accept, vendor = %vendor, error = %err, "Rejecting Accept header");
            metrics::record_rejection(err.kind());
            err.into_response()
        }
    }
}
