//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses, header names and timeouts
//! - Compile every route constraint so a bad expression fails at load time
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Service names are resolved later, against the service catalog

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::versioning::Constraint;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("versioning.vendor must not be empty")]
    EmptyVendor,

    #[error("versioning.response_header {0:?} is not a valid header name")]
    ResponseHeader(String),

    #[error("routes must not be empty")]
    NoRoutes,

    #[error("routes[{index}]: {reason}")]
    Route { index: usize, reason: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.versioning.vendor.trim().is_empty() {
        errors.push(ValidationError::EmptyVendor);
    }

    if HeaderName::try_from(config.versioning.response_header.as_str()).is_err() {
        errors.push(ValidationError::ResponseHeader(config.versioning.response_header.clone()));
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }
    for (index, route) in config.routes.iter().enumerate() {
        if let Err(e) = Constraint::compile(&route.constraint) {
            errors.push(ValidationError::Route { index, reason: e.to_string() });
        }
        if route.service.trim().is_empty() {
            errors.push(ValidationError::Route {
                index,
                reason: "service must not be empty".to_string(),
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(config.observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RouteConfig, RouteList};

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "localhost".into();
        config.versioning.vendor = " ".into();
        config.versioning.response_header = "bad header".into();
        config.timeouts.request_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();
        config.routes = RouteList(vec![
            RouteConfig { constraint: ">=1".into(), service: "v1".into() },
            RouteConfig { constraint: ">=".into(), service: "".into() },
        ]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&ValidationError::BindAddress("localhost".into())));
        assert!(errors.contains(&ValidationError::EmptyVendor));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::Route { index: 1, .. })));
    }

    #[test]
    fn test_no_routes() {
        let mut config = ServerConfig::default();
        config.routes = RouteList(Vec::new());
        assert_eq!(validate_config(&config), Err(vec![ValidationError::NoRoutes]));
    }
}
