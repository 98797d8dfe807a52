//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::health::LivenessProbe;
use crate::transport::TransportOptions;

/// Root configuration for a multi-endpoint client.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint URIs in initial ring order.
    pub endpoints: Vec<String>,

    /// Fail over to the next endpoint when an attempt fails.
    pub auto_update: bool,

    /// HTTP transport settings.
    pub transport: TransportConfig,

    /// Liveness ranking settings.
    pub ranking: RankingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            auto_update: true,
            transport: TransportConfig::default(),
            ranking: RankingConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TransportConfig {
    /// Per-attempt request timeout in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            headers: BTreeMap::new(),
        }
    }
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Options passed to the transport with every POST.
    pub fn options(&self) -> TransportOptions {
        TransportOptions {
            timeout: Some(Duration::from_secs(self.timeout_secs)),
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Liveness ranking configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RankingConfig {
    /// RPC method whose numeric result ranks endpoints.
    pub probe_method: String,

    /// Parameters for the probe method.
    pub probe_params: Vec<Value>,

    /// Rank endpoints once before the first call.
    pub rank_on_start: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        let probe = LivenessProbe::default();
        Self {
            probe_method: probe.method,
            probe_params: probe.params,
            rank_on_start: false,
        }
    }
}

impl RankingConfig {
    pub fn probe(&self) -> LivenessProbe {
        LivenessProbe {
            method: self.probe_method.clone(),
            params: self.probe_params.clone(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
