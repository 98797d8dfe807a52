//! Transport subsystem.
//!
//! # Data Flow
//! ```text
//! FailoverController
//!     → Transport::post(current endpoint, encoded body, options)
//!     → http.rs (reqwest POST with per-request timeout and headers)
//!     → raw response bytes or TransportError
//! ```
//!
//! # Design Decisions
//! - The transport is a capability trait, not a concrete client
//! - Per-attempt timeouts belong to the transport, never to the controller
//! - Non-2xx statuses are transport failures

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub mod http;

pub use http::HttpTransport;

/// Options passed with every POST.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Total request timeout for a single attempt.
    pub timeout: Option<Duration>,
    /// Extra headers sent with each request.
    pub headers: Vec<(String, String)>,
}

/// Errors raised while delivering a request to one endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered but the body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Delivers an encoded request to a single endpoint.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        uri: &str,
        body: &[u8],
        options: &TransportOptions,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}
