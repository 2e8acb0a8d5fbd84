//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.versioning.vendor, "vnd.api+json");
        let exprs: Vec<&str> = config.routes.iter().map(|r| r.constraint.as_str()).collect();
        assert_eq!(exprs, [">=1", "2"]);
    }

    #[test]
    fn test_full_file() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [versioning]
            vendor = "vnd.example+json"

            [[routes]]
            constraint = "^1"
            service = "v1"

            [[routes]]
            constraint = "^2"
            service = "v2"

            [timeouts]
            request_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.versioning.vendor, "vnd.example+json");
        assert_eq!(config.versioning.response_header, "X-API-Version");
        assert_eq!(config.routes.0.len(), 2);
        assert_eq!(config.routes.0[1].constraint, "^2");
        assert_eq!(config.timeouts.request_secs, 5);
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_config("[listener"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_semantic_errors_reported() {
        let err = parse_config(
            r#"
            [[routes]]
            constraint = "not a version"
            service = "v1"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("not a version"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/version-router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
