//! Version-aware request dispatch.
//!
//! # Data Flow
//! ```text
//! Incoming Request (Accept: application/vnd.api+json; version=2)
//!     → extractor.rs (accept_version middleware)
//!         → media_type.rs (parse Accept, check vendor, read `version`)
//!         → version.rs (partial semver → ApiVersion)
//!         → insert ApiVersion into request extensions   | 406 on failure
//!     → dispatch.rs (VersionRouter)
//!         → read ApiVersion from extensions              | 400 if absent
//!         → table.rs (first satisfied RouteEntry)         | 404 if none
//!         → stamp X-API-Version, call handler
//!
//! Route Compilation (at startup):
//!     (expression, handler) pairs
//!     → constraint.rs (compile each expression)
//!     → sort by descending bound (stable)
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Route table compiled at startup, immutable at runtime
//! - A bad constraint expression fails startup, never a request
//! - Deterministic: highest bound first, declaration order breaks ties
//! - First match wins

pub mod constraint;
pub mod dispatch;
pub mod error;
pub mod extractor;
pub mod media_type;
pub mod table;
pub mod version;

pub use constraint::Constraint;
pub use dispatch::{RequestDeadline, VersionRouter, X_API_VERSION};
pub use error::{SetupError, VersionError};
pub use extractor::{accept_version, VendorToken};
pub use media_type::parse_accept;
pub use table::{RouteEntry, RouteTable};
pub use version::ApiVersion;

use axum::{middleware, Router};

/// Compose the extractor and the constraint router into a single service.
///
/// Equivalent to mounting `accept_version` on the whole router and the
/// `VersionRouter` as its catch-all.
pub fn versioned(vendor: VendorToken, router: VersionRouter) -> Router {
    router
        .into_router()
        .layer(middleware::from_fn_with_state(vendor, accept_version))
}
