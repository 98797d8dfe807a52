//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - An empty endpoint list is valid; calls fail later with `NoEndpoints`

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("endpoint '{url}' uses unsupported scheme '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("ranking probe method must not be empty")]
    EmptyProbeMethod,

    #[error("header name must not be empty")]
    EmptyHeaderName,

    #[error("header '{0}' must have a value")]
    EmptyHeaderValue(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for endpoint in &config.endpoints {
        match Url::parse(endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::UnsupportedScheme {
                url: endpoint.clone(),
                scheme: url.scheme().to_string(),
            }),
            Err(e) => errors.push(ValidationError::InvalidEndpoint {
                url: endpoint.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.transport.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("transport.timeout_secs"));
    }
    if config.transport.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("transport.connect_timeout_secs"));
    }
    if config.ranking.probe_method.trim().is_empty() {
        errors.push(ValidationError::EmptyProbeMethod);
    }
    if config.transport.headers.keys().any(|name| name.trim().is_empty()) {
        errors.push(ValidationError::EmptyHeaderName);
    }
    for (name, value) in &config.transport.headers {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyHeaderValue(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
