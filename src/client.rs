//! Multi-endpoint JSON-RPC client.
//!
//! # Responsibilities
//! - Hold the endpoint ring, failover policy, transport and codec together
//! - Run one logical RPC call with transparent failover
//! - Expose current/next endpoint, manual rotation and liveness ranking

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::codec::{Codec, JsonRpcCodec, RpcResponse};
use crate::config::ClientConfig;
use crate::endpoint::EndpointRing;
use crate::error::{Error, Result};
use crate::failover::{DecisionHook, FailoverController, FailoverPolicy};
use crate::health::{HealthRanker, LivenessProbe};
use crate::observability::metrics;
use crate::transport::{HttpTransport, Transport, TransportError, TransportOptions};

/// JSON-RPC client that fails over across a pool of equivalent endpoints.
///
/// Safe to share across tasks: ring reads and rotations are serialized.
pub struct MultiEndpointClient<T = HttpTransport, C = JsonRpcCodec> {
    controller: FailoverController,
    ranker: HealthRanker,
    transport: T,
    codec: C,
    options: TransportOptions,
}

impl MultiEndpointClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Build an HTTP client from a validated configuration.
    pub fn from_config(config: &ClientConfig) -> std::result::Result<Self, TransportError> {
        ClientBuilder::from_config(config).build()
    }
}

impl<T, C> MultiEndpointClient<T, C>
where
    T: Transport,
    C: Codec,
{
    /// Send one RPC call and return the full decoded response.
    pub async fn make_request(&self, method: &str, params: &[Value]) -> Result<RpcResponse> {
        metrics::record_request(method);
        self.controller
            .execute(&self.transport, &self.codec, &self.options, method, params)
            .await
    }

    /// Send one RPC call and return only its `result` member.
    pub async fn request(&self, method: &str, params: &[Value]) -> Result<Value> {
        self.make_request(method, params)
            .await
            .map(RpcResponse::into_result)
    }

    pub fn current_endpoint(&self) -> Option<String> {
        self.controller.current()
    }

    pub fn next_endpoint(&self) -> Option<String> {
        self.controller.next()
    }

    /// Endpoints in present ring order.
    pub fn endpoints(&self) -> Vec<String> {
        self.controller.snapshot().to_vec()
    }

    /// Rotate to the next endpoint without making a call.
    pub fn update_endpoint(&self) -> Option<String> {
        self.controller.rotate()
    }

    pub fn policy(&self) -> &FailoverPolicy {
        self.controller.policy()
    }

    /// Probe every endpoint and reorder the ring by liveness, best first.
    ///
    /// Returns the score of each distinct endpoint in ranked order. Rotations
    /// made by concurrent calls while the probes are in flight are discarded.
    pub async fn sort_endpoints(&self) -> Vec<(String, u64)> {
        let ring = self.controller.snapshot();
        let ranking = self
            .ranker
            .rank(&ring, &self.transport, &self.codec, &self.options)
            .await;
        self.controller.replace_ring(ranking.ring);
        ranking.scores
    }
}

impl<T, C> std::fmt::Debug for MultiEndpointClient<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiEndpointClient")
            .field("endpoints", &self.controller.snapshot())
            .field("policy", self.controller.policy())
            .field("probe", &self.ranker.probe().method)
            .field("timeout", &self.options.timeout)
            .finish()
    }
}

/// Builder for [`MultiEndpointClient`].
#[derive(Clone)]
pub struct ClientBuilder {
    endpoints: Vec<String>,
    auto_update: bool,
    hook: Option<DecisionHook>,
    options: TransportOptions,
    connect_timeout: Duration,
    probe: LivenessProbe,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            auto_update: true,
            hook: None,
            options: TransportOptions::default(),
            connect_timeout: Duration::from_secs(5),
            probe: LivenessProbe::default(),
        }
    }
}

impl ClientBuilder {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            endpoints: config.endpoints.clone(),
            auto_update: config.auto_update,
            hook: None,
            options: config.transport.options(),
            connect_timeout: config.transport.connect_timeout(),
            probe: config.ranking.probe(),
        }
    }

    pub fn endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    pub fn auto_update(mut self, enabled: bool) -> Self {
        self.auto_update = enabled;
        self
    }

    /// Install a hook consulted before each rotation.
    pub fn decision_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, Option<&str>, &Error) -> bool + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.push((name.into(), value.into()));
        self
    }

    pub fn liveness_probe(mut self, probe: LivenessProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Build with the reqwest transport and the JSON-RPC codec.
    pub fn build(self) -> std::result::Result<MultiEndpointClient, TransportError> {
        let transport = HttpTransport::new(self.connect_timeout)?;
        Ok(self.build_with(transport, JsonRpcCodec::new()))
    }

    /// Build with caller-supplied transport and codec.
    pub fn build_with<T, C>(self, transport: T, codec: C) -> MultiEndpointClient<T, C>
    where
        T: Transport,
        C: Codec,
    {
        let policy = FailoverPolicy::new(self.auto_update, self.hook);
        tracing::debug!(
            endpoints = self.endpoints.len(),
            policy = ?policy,
            "Creating multi-endpoint client"
        );

        MultiEndpointClient {
            controller: FailoverController::new(EndpointRing::new(self.endpoints), policy),
            ranker: HealthRanker::new(self.probe),
            transport,
            codec,
            options: self.options,
        }
    }
}
