//! Metric names and recording helpers.
//!
//! # Metrics
//! - `rpc_requests_total` (counter): logical calls by method
//! - `rpc_attempt_failures_total` (counter): failed attempts by endpoint
//! - `rpc_endpoint_rotations_total` (counter): ring rotations
//! - `rpc_exhausted_total` (counter): calls that ran out of endpoints, by method
//! - `rpc_endpoint_liveness` (gauge): last probed liveness metric by endpoint

use metrics::{counter, gauge};

pub fn record_request(method: &str) {
    counter!("rpc_requests_total", "method" => method.to_string()).increment(1);
}

pub fn record_attempt_failure(endpoint: &str) {
    counter!("rpc_attempt_failures_total", "endpoint" => endpoint.to_string()).increment(1);
}

pub fn record_rotation() {
    counter!("rpc_endpoint_rotations_total").increment(1);
}

pub fn record_exhausted(method: &str) {
    counter!("rpc_exhausted_total", "method" => method.to_string()).increment(1);
}

pub fn record_liveness(endpoint: &str, score: u64) {
    gauge!("rpc_endpoint_liveness", "endpoint" => endpoint.to_string()).set(score as f64);
}
