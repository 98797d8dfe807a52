//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;
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

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            endpoints = ["https://rpc.ankr.com/eth", "https://eth.llamarpc.com"]
            auto_update = false

            [transport]
            timeout_secs = 3
            headers = { "x-api-key" = "abc" }

            [ranking]
            probe_method = "eth_blockNumber"
            rank_on_start = true

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoints.len(), 2);
        assert!(!config.auto_update);
        assert_eq!(config.transport.timeout_secs, 3);
        assert_eq!(config.transport.connect_timeout_secs, 5);
        assert_eq!(
            config.transport.headers,
            BTreeMap::from([("x-api-key".to_string(), "abc".to_string())])
        );
        assert!(config.ranking.rank_on_start);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_invalid_config_reports_validation() {
        let err = parse_config(r#"endpoints = ["ftp://example.com"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = parse_config("endpoints = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/rpc-failover.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
