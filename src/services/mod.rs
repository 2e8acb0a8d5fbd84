//! Versioned resource services.
//!
//! Each API major version is an independent axum `Router`. The version
//! router picks one per request; services never look at the `Accept` header.

pub mod v1;
pub mod v2;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;

use crate::config::RouteList;
use crate::versioning::{RouteTable, SetupError};

/// Greeting returned by every version's root resource.
#[derive(Debug, Serialize)]
pub struct Greeting {
    pub version: &'static str,
    pub message: &'static str,
}

/// JSON response with an explicit charset, as all versions answer.
pub(crate) fn respond<T: Serialize>(data: T, status: StatusCode) -> Response {
    let mut response = (status, Json(data)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json; charset=utf-8"),
    );
    response
}

/// Look up a service by the name used in configuration.
pub fn catalog(name: &str) -> Result<Router, SetupError> {
    match name {
        "v1" => Ok(v1::router()),
        "v2" => Ok(v2::router()),
        other => Err(SetupError::UnknownService(other.to_string())),
    }
}

/// Build the route table described by configuration.
pub fn route_table(routes: &RouteList) -> Result<RouteTable, SetupError> {
    let pairs = routes
        .iter()
        .map(|r| Ok((r.constraint.as_str(), catalog(&r.service)?)))
        .collect::<Result<Vec<_>, SetupError>>()?;
    RouteTable::build(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;

    #[test]
    fn test_unknown_service() {
        assert_eq!(
            catalog("v9").unwrap_err(),
            SetupError::UnknownService("v9".into())
        );
    }

    #[test]
    fn test_route_table_from_config() {
        let table = route_table(&RouteList::default()).unwrap();
        let order: Vec<&str> = table.entries().iter().map(|e| e.constraint.expression()).collect();
        assert_eq!(order, ["2", ">=1"]);

        let bad = RouteList(vec![RouteConfig {
            constraint: "1".into(),
            service: "legacy".into(),
        }]);
        assert!(matches!(route_table(&bad), Err(SetupError::UnknownService(_))));
    }
}
