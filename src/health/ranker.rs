//! Concurrent liveness ranking.

use std::collections::HashMap;

use futures_util::future::join_all;
use serde_json::Value;

use crate::codec::Codec;
use crate::endpoint::EndpointRing;
use crate::error::{Error, Result};
use crate::observability::metrics;
use crate::transport::{Transport, TransportError, TransportOptions};

/// RPC call whose numeric result measures endpoint freshness.
#[derive(Debug, Clone, PartialEq)]
pub struct LivenessProbe {
    pub method: String,
    pub params: Vec<Value>,
}

impl Default for LivenessProbe {
    fn default() -> Self {
        Self {
            method: "eth_blockNumber".to_string(),
            params: Vec::new(),
        }
    }
}

/// Outcome of a ranking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// The ring reordered by score, best first.
    pub ring: EndpointRing,
    /// Score per distinct endpoint, in ranked order.
    pub scores: Vec<(String, u64)>,
}

/// One-shot prober that orders endpoints by their liveness metric.
#[derive(Debug, Clone, Default)]
pub struct HealthRanker {
    probe: LivenessProbe,
}

impl HealthRanker {
    pub fn new(probe: LivenessProbe) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &LivenessProbe {
        &self.probe
    }

    /// Probe every distinct endpoint concurrently and reorder the ring.
    ///
    /// Returns only after every probe has finished. Endpoints whose probe
    /// fails score 0; ties keep their relative order.
    pub async fn rank<T, C>(
        &self,
        ring: &EndpointRing,
        transport: &T,
        codec: &C,
        options: &TransportOptions,
    ) -> Ranking
    where
        T: Transport,
        C: Codec,
    {
        let distinct = ring.distinct();

        let results: Vec<(&str, u64)> = match codec.encode(&self.probe.method, &self.probe.params) {
            Ok(body) => {
                let probes = distinct.iter().map(|&uri| {
                    let body = &body;
                    async move {
                        let score = match probe_one(transport, codec, options, uri, body).await {
                            Ok(score) => {
                                tracing::debug!(endpoint = %uri, score, "Liveness probe succeeded");
                                score
                            }
                            Err(e) => {
                                tracing::warn!(endpoint = %uri, error = %e, "Liveness probe failed");
                                0
                            }
                        };
                        (uri, score)
                    }
                });
                join_all(probes).await
            }
            Err(e) => {
                tracing::warn!(method = %self.probe.method, error = %e, "Failed to encode liveness probe");
                distinct.iter().map(|&uri| (uri, 0)).collect()
            }
        };

        let by_uri: HashMap<&str, u64> = results.iter().copied().collect();
        let score_of = |uri: &str| by_uri.get(uri).copied().unwrap_or(0);

        let mut ordered = ring.to_vec();
        ordered.sort_by(|a, b| score_of(b.as_str()).cmp(&score_of(a.as_str())));

        let mut scores: Vec<(String, u64)> = results
            .iter()
            .map(|&(uri, score)| (uri.to_string(), score))
            .collect();
        scores.sort_by(|a, b| b.1.cmp(&a.1));

        for (uri, score) in &scores {
            metrics::record_liveness(uri, *score);
        }
        tracing::info!(order = ?ordered, "Endpoints ranked by liveness");

        Ranking {
            ring: EndpointRing::new(ordered),
            scores,
        }
    }
}

async fn probe_one<T, C>(
    transport: &T,
    codec: &C,
    options: &TransportOptions,
    endpoint: &str,
    body: &[u8],
) -> Result<u64>
where
    T: Transport,
    C: Codec,
{
    let transport_error = |source: TransportError| Error::Transport {
        endpoint: endpoint.to_string(),
        source,
    };

    let raw = transport
        .post(endpoint, body, options)
        .await
        .map_err(transport_error)?;
    let response = codec
        .decode(&raw)
        .map_err(|e| transport_error(TransportError::Malformed(e.to_string())))?;

    if let Some(error) = response.error() {
        return Err(Error::Application {
            endpoint: endpoint.to_string(),
            error: error.clone(),
        });
    }

    let result = response.into_result();
    parse_liveness(&result).ok_or_else(|| {
        transport_error(TransportError::Malformed(format!(
            "non-numeric liveness result: {}",
            result
        )))
    })
}

/// Read a quantity as either a `0x` hex string, a decimal string, or a JSON number.
pub fn parse_liveness(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => s.parse().ok(),
        },
        _ => None,
    }
}
