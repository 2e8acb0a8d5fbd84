//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, deadline stamp)
//!     → versioning (accept_version → VersionRouter)
//!     → versioned service
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{stamp_deadline, X_REQUEST_ID};
pub use server::HttpServer;
