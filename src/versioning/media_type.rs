//! `Accept` header parsing.
//!
//! # Responsibilities
//! - Parse a single media type with parameters
//! - Check that it names the configured vendor type
//! - Pull out and parse the `version` parameter
//!
//! # Design Decisions
//! - Whitespace around `;` and `=` is tolerated on either side
//! - A parameter given twice makes the media type malformed
//! - Vendor check is a case-insensitive substring match on the essence
//! - Only one media range is considered; no quality weighting

use mime::Mime;

use crate::versioning::error::VersionError;
use crate::versioning::version::ApiVersion;

/// Media type parameter carrying the requested version.
pub const VERSION_PARAM: &str = "version";

/// Parse an `Accept` header value into the requested API version.
pub fn parse_accept(header: &str, vendor: &str) -> Result<ApiVersion, VersionError> {
    let media_type = parse_media_type(header)?;

    let essence = media_type.essence_str().to_ascii_lowercase();
    if !essence.contains(&vendor.to_ascii_lowercase()) {
        return Err(VersionError::WrongVendor(essence));
    }

    let value = media_type
        .get_param(VERSION_PARAM)
        .ok_or(VersionError::MissingVersionParameter)?;

    ApiVersion::parse(value.as_str().trim_matches('"'))
}

/// Parse a media type, normalising whitespace around parameter separators.
fn parse_media_type(header: &str) -> Result<Mime, VersionError> {
    let mut segments = header.split(';').map(str::trim);

    let essence = segments.next().unwrap_or_default();
    if essence.is_empty() {
        return Err(VersionError::MalformedMediaType);
    }

    let mut normalized = essence.to_string();
    let mut seen: Vec<String> = Vec::new();
    for param in segments.filter(|s| !s.is_empty()) {
        let (name, value) = param
            .split_once('=')
            .ok_or(VersionError::MalformedMediaType)?;
        let name = name.trim().to_ascii_lowercase();
        if seen.contains(&name) {
            return Err(VersionError::MalformedMediaType);
        }

        normalized.push_str("; ");
        normalized.push_str(&name);
        normalized.push('=');
        normalized.push_str(value.trim());
        seen.push(name);
    }

    normalized
        .parse::<Mime>()
        .map_err(|_| VersionError::MalformedMediaType)
}
