//! Version-aware request dispatch for HTTP services.
//!
//! Clients ask for an API version through the `Accept` header
//! (`application/vnd.api+json; version=2`); the server routes each request to
//! the service whose semantic-version constraint the version satisfies.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod services;
pub mod versioning;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use versioning::{versioned, ApiVersion, RouteTable, VendorToken, VersionRouter};
