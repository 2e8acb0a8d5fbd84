//! Request preparation.
//!
//! # Responsibilities
//! - Attach a `RequestDeadline` derived from the configured request timeout
//! - Name the request ID header shared by the tower-http layers
//!
//! # Design Decisions
//! - Deadline is stamped as early as possible so it covers the whole stack
//! - The timeout itself is still enforced by `TimeoutLayer`; the deadline only
//!   lets the version router skip work for requests that are already late

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::versioning::RequestDeadline;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Insert a `RequestDeadline` `timeout` from now, unless one is already set.
pub async fn stamp_deadline(
    State(timeout): State<Duration>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if req.extensions().get::<RequestDeadline>().is_none() {
        req.extensions_mut()
            .insert(RequestDeadline(Instant::now() + timeout));
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_deadline_stamped() {
        let app = Router::new()
            .route(
                "/",
                get(|Extension(deadline): Extension<RequestDeadline>| async move {
                    if deadline.has_passed() { "late" } else { "on time" }
                }),
            )
            .layer(middleware::from_fn_with_state(
                Duration::from_secs(30),
                stamp_deadline,
            ));

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"on time");
    }
}
