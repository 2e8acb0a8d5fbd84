//! Error types for version negotiation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Per-request negotiation failures.
///
/// Each variant is terminal: it is turned into a response at the stage that
/// detects it and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Accept header is not a valid media type")]
    MalformedMediaType,

    #[error("media type {0:?} does not name the expected vendor")]
    WrongVendor(String),

    #[error("media type has no version parameter")]
    MissingVersionParameter,

    #[error("invalid version {0:?}")]
    InvalidVersionFormat(String),

    #[error("no API version attached to request")]
    MissingContextVersion,

    #[error("no route satisfies version {0}")]
    NoConstraintSatisfied(String),

    #[error("request deadline passed before dispatch")]
    DeadlineExceeded,
}

impl VersionError {
    /// HTTP status this failure maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            VersionError::MalformedMediaType
            | VersionError::WrongVendor(_)
            | VersionError::MissingVersionParameter
            | VersionError::InvalidVersionFormat(_) => StatusCode::NOT_ACCEPTABLE,
            VersionError::MissingContextVersion => StatusCode::BAD_REQUEST,
            VersionError::NoConstraintSatisfied(_) => StatusCode::NOT_FOUND,
            VersionError::DeadlineExceeded => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            VersionError::MalformedMediaType => "malformed_media_type",
            VersionError::WrongVendor(_) => "wrong_vendor",
            VersionError::MissingVersionParameter => "missing_version_parameter",
            VersionError::InvalidVersionFormat(_) => "invalid_version_format",
            VersionError::MissingContextVersion => "missing_context_version",
            VersionError::NoConstraintSatisfied(_) => "no_constraint_satisfied",
            VersionError::DeadlineExceeded => "deadline_exceeded",
        }
    }

    fn body(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_ACCEPTABLE => "not acceptable",
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::NOT_FOUND => "not found",
            _ => "request timeout",
        }
    }
}

impl IntoResponse for VersionError {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

/// Configuration errors detected while wiring the router. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("invalid constraint expression {expression:?}: {reason}")]
    InvalidConstraintExpression { expression: String, reason: String },

    #[error("vendor token must not be empty")]
    EmptyVendor,

    #[error("invalid response header name {0:?}")]
    InvalidHeaderName(String),

    #[error("unknown service {0:?}")]
    UnknownService(String),
}
