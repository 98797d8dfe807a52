//! JSON-RPC 2.0 wire codec.
//!
//! # Responsibilities
//! - Encode a method name and parameter list into request bytes
//! - Decode response bytes into an `RpcResponse`
//! - Expose the embedded `error` object separately from the result

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Encodes requests and decodes responses for one RPC protocol.
pub trait Codec: Send + Sync {
    fn encode(&self, method: &str, params: &[Value]) -> Result<Vec<u8>, serde_json::Error>;
    fn decode(&self, raw: &[u8]) -> Result<RpcResponse, serde_json::Error>;
}

/// Outgoing JSON-RPC request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: u64,
}

/// Error object embedded in a JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Decoded JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RpcResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    /// Embedded application-level error, if any.
    pub fn error(&self) -> Option<&RpcErrorObject> {
        self.error.as_ref()
    }

    /// The `result` member, `Value::Null` when absent.
    pub fn into_result(self) -> Value {
        self.result.unwrap_or(Value::Null)
    }
}

/// JSON-RPC 2.0 codec with monotonically increasing request ids.
#[derive(Debug, Default)]
pub struct JsonRpcCodec {
    next_id: AtomicU64,
}

impl JsonRpcCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Codec for JsonRpcCodec {
    fn encode(&self, method: &str, params: &[Value]) -> Result<Vec<u8>, serde_json::Error> {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params: params.to_vec(),
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        serde_json::to_vec(&request)
    }

    fn decode(&self, raw: &[u8]) -> Result<RpcResponse, serde_json::Error> {
        serde_json::from_slice(raw)
    }
}
