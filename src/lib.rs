//! Resilient JSON-RPC client over a pool of interchangeable HTTP endpoints.
//!
//! A single logical call goes to the current endpoint of a rotating ring.
//! When the attempt fails (transport error, undecodable body, or an `error`
//! member in the response) the ring rotates and the call is retried, at most
//! once per endpoint. An optional one-shot ranking reorders the ring by a
//! liveness metric such as the reported block height.

// Core subsystems
pub mod client;
pub mod codec;
pub mod endpoint;
pub mod failover;
pub mod health;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientBuilder, MultiEndpointClient};
pub use codec::{Codec, JsonRpcCodec, RpcErrorObject, RpcResponse};
pub use config::ClientConfig;
pub use endpoint::EndpointRing;
pub use error::{Error, Result};
pub use failover::{DecisionHook, FailoverPolicy};
pub use health::{HealthRanker, LivenessProbe};
pub use transport::{HttpTransport, Transport, TransportError, TransportOptions};
