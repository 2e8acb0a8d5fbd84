//! Semantic version values carried per request.
//!
//! # Design Decisions
//! - Partial versions (`1`, `1.2`) are padded with zeros
//! - A leading `v` is tolerated (`v2` == `2.0.0`)
//! - Pre-release and build metadata are kept and follow semver precedence

use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::versioning::error::VersionError;

/// API version requested by a client.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion(Version);

impl ApiVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse a possibly partial semantic version.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidVersionFormat(input.to_string());

        let trimmed = input.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let (core, suffix) = match trimmed.find(&['-', '+'][..]) {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        let mut padded = parts.join(".");
        for _ in parts.len()..3 {
            padded.push_str(".0");
        }
        padded.push_str(suffix);

        Version::parse(&padded).map(Self).map_err(|_| invalid())
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn as_semver(&self) -> &Version {
        &self.0
    }
}

impl FromStr for ApiVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Version> for ApiVersion {
    fn from(version: Version) -> Self {
        Self(version)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
