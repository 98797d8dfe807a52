//! Failover state machine.
//!
//! One `execute` call drives one traversal:
//! ```text
//! Idle → Attempting(head) → Success
//!                         → Attempting(head') ... → Exhausted
//!                         → Aborted (failover disabled)
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::codec::{Codec, RpcResponse};
use crate::endpoint::EndpointRing;
use crate::error::{Error, Result};
use crate::failover::policy::FailoverPolicy;
use crate::observability::metrics;
use crate::transport::{Transport, TransportError, TransportOptions};

/// Owns the endpoint ring and walks it when attempts fail.
#[derive(Debug)]
pub struct FailoverController {
    ring: Mutex<EndpointRing>,
    policy: FailoverPolicy,
}

impl FailoverController {
    pub fn new(ring: EndpointRing, policy: FailoverPolicy) -> Self {
        Self {
            ring: Mutex::new(ring),
            policy,
        }
    }

    // Ring operations cannot leave it half-updated, so a poisoned lock is still usable.
    fn ring(&self) -> MutexGuard<'_, EndpointRing> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn policy(&self) -> &FailoverPolicy {
        &self.policy
    }

    pub fn current(&self) -> Option<String> {
        self.ring().current().map(str::to_string)
    }

    pub fn next(&self) -> Option<String> {
        self.ring().next().map(str::to_string)
    }

    /// Copy of the ring in its present order.
    pub fn snapshot(&self) -> EndpointRing {
        self.ring().clone()
    }

    /// Swap in a reordered ring (used after ranking).
    pub fn replace_ring(&self, ring: EndpointRing) {
        *self.ring() = ring;
    }

    /// Advance the head by one and return the new head.
    pub fn rotate(&self) -> Option<String> {
        let mut ring = self.ring();
        let from = ring.current().map(str::to_string);
        ring.rotate();
        let to = ring.current().map(str::to_string);
        drop(ring);

        log_rotation(from.as_deref(), to.as_deref());
        to
    }

    /// Advance the head only if it is still `failed`.
    ///
    /// A concurrent call that already moved past `failed` leaves the ring as is.
    pub fn rotate_from(&self, failed: &str) -> Option<String> {
        let mut ring = self.ring();
        if ring.current() != Some(failed) {
            return ring.current().map(str::to_string);
        }
        ring.rotate();
        let to = ring.current().map(str::to_string);
        drop(ring);

        log_rotation(Some(failed), to.as_deref());
        to
    }

    /// Endpoint following `uri` in the ring.
    pub fn next_after(&self, uri: &str) -> Option<String> {
        self.ring().successor(uri).map(str::to_string)
    }

    /// Run one RPC call, failing over across the ring as the policy allows.
    pub async fn execute<T, C>(
        &self,
        transport: &T,
        codec: &C,
        options: &TransportOptions,
        method: &str,
        params: &[Value],
    ) -> Result<RpcResponse>
    where
        T: Transport,
        C: Codec,
    {
        let size = {
            let ring = self.ring();
            if ring.is_empty() {
                return Err(Error::NoEndpoints);
            }
            ring.size()
        };

        let body = codec.encode(method, params).map_err(Error::Encode)?;
        let bound = size.max(1);
        let mut steps = 0;
        let mut attempts = 0;

        loop {
            let endpoint = self.current().ok_or(Error::NoEndpoints)?;
            tracing::debug!(endpoint = %endpoint, method, "Making RPC request");

            let err = match attempt(transport, codec, options, &endpoint, &body).await {
                Ok(response) => {
                    tracing::debug!(
                        endpoint = %endpoint,
                        method,
                        response = ?response,
                        "Received RPC response"
                    );
                    return Ok(response);
                }
                Err(err) => err,
            };

            attempts += 1;
            tracing::error!(endpoint = %endpoint, error = %err, "RPC attempt failed");
            metrics::record_attempt_failure(&endpoint);

            match &self.policy {
                FailoverPolicy::NoRotate => return Err(err),
                FailoverPolicy::AlwaysRotate => {
                    self.rotate_from(&endpoint);
                    steps += 1;
                }
                FailoverPolicy::RotateUntilHookApproves(hook) => {
                    let mut position = endpoint.clone();
                    while steps < bound {
                        let next = self.next_after(&position);
                        let approved = hook(endpoint.as_str(), next.as_deref(), &err);
                        self.rotate_from(&position);
                        steps += 1;
                        if let Some(next) = next {
                            position = next;
                        }
                        if approved {
                            break;
                        }
                    }
                }
            }

            if steps >= bound {
                tracing::warn!(method, attempts, "All endpoints exhausted");
                metrics::record_exhausted(method);
                return Err(Error::Exhausted {
                    attempts,
                    last: Box::new(err),
                });
            }
        }
    }
}

fn log_rotation(from: Option<&str>, to: Option<&str>) {
    tracing::debug!(
        from = from.unwrap_or("<none>"),
        to = to.unwrap_or("<none>"),
        "Updating endpoint"
    );
    metrics::record_rotation();
}

/// POST to one endpoint and classify the outcome.
async fn attempt<T, C>(
    transport: &T,
    codec: &C,
    options: &TransportOptions,
    endpoint: &str,
    body: &[u8],
) -> Result<RpcResponse>
where
    T: Transport,
    C: Codec,
{
    let raw = transport
        .post(endpoint, body, options)
        .await
        .map_err(|source| Error::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

    let response = codec.decode(&raw).map_err(|e| Error::Transport {
        endpoint: endpoint.to_string(),
        source: TransportError::Malformed(e.to_string()),
    })?;

    if let Some(error) = response.error() {
        return Err(Error::Application {
            endpoint: endpoint.to_string(),
            error: error.clone(),
        });
    }

    Ok(response)
}
