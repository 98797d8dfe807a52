//! Error taxonomy for multi-endpoint RPC calls.
//!
//! # Propagation
//! ```text
//! Transport / Application  → recovered by rotating endpoints
//!                            (returned unchanged when failover is disabled)
//! NoEndpoints / Exhausted  → always returned to the caller
//! Encode                   → returned before any endpoint is contacted
//! ```

use thiserror::Error;

use crate::codec::RpcErrorObject;
use crate::transport::TransportError;

/// Errors returned by a failover-enabled RPC call.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint ring is empty at call time.
    #[error("no endpoints configured")]
    NoEndpoints,

    /// The transport failed to deliver the request or returned garbage.
    #[error("transport error from {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: TransportError,
    },

    /// A well-formed response carried an `error` object.
    #[error("RPC error from {endpoint}: {error}")]
    Application {
        endpoint: String,
        error: RpcErrorObject,
    },

    /// Every endpoint was tried without success.
    #[error("all endpoints exhausted after {attempts} attempts: {last}")]
    Exhausted {
        attempts: usize,
        #[source]
        last: Box<Error>,
    },

    /// The request could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// True for failures that count as a single failed attempt against one endpoint.
    pub fn is_attempt_failure(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Application { .. })
    }

    /// Endpoint that produced this error, if it came from one.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Error::Transport { endpoint, .. } | Error::Application { endpoint, .. } => {
                Some(endpoint)
            }
            _ => None,
        }
    }
}

/// Result type for RPC operations.
pub type Result<T> = std::result::Result<T, Error>;
