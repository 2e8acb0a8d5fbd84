//! Version 2 of the resource API.

use axum::{http::StatusCode, response::Response, routing::get, Router};

use crate::services::{respond, Greeting};

pub fn router() -> Router {
    Router::new().route("/", get(handle_resource))
}

async fn handle_resource() -> Response {
    respond(
        Greeting {
            version: "v2",
            message: "hello world",
        },
        StatusCode::OK,
    )
}
