//! Version 1 of the resource API.

use axum::{http::StatusCode, response::Response, routing::get, Router};

use crate::services::{respond, Greeting};

pub fn router() -> Router {
    Router::new().route("/", get(handle_resource))
}

async fn handle_resource() -> Response {
    respond(
        Greeting {
            version: "v1",
            message: "hello world",
        },
        StatusCode::OK,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_resource() {
        let res = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "application/json; charset=utf-8"
        );

        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["version"], "v1");
        assert_eq!(json["message"], "hello world");
    }
}
