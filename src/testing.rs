//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};

use crate::transport::{Transport, TransportError, TransportOptions};

/// Canned reply for one endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    Result(Value),
    RpcError(i64, &'static str),
    Fail(TransportError),
    Garbage,
}

/// Transport that answers from a per-endpoint script and records every call.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, uri: &str, reply: Reply) -> Self {
        self.replies.insert(uri.to_string(), reply);
        self
    }

    pub fn delay(mut self, uri: &str, delay: Duration) -> Self {
        self.delays.insert(uri.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn post(
        &self,
        uri: &str,
        _body: &[u8],
        _options: &TransportOptions,
    ) -> Result<Vec<u8>, TransportError> {
        self.calls.lock().unwrap().push(uri.to_string());
        let reply = self.replies.get(uri).cloned();
        let delay = self.delays.get(uri).copied();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(Reply::Result(value)) => {
                Ok(serde_json::to_vec(&json!({"jsonrpc": "2.0", "id": 0, "result": value})).unwrap())
            }
            Some(Reply::RpcError(code, message)) => Ok(serde_json::to_vec(
                &json!({"jsonrpc": "2.0", "id": 0, "error": {"code": code, "message": message}}),
            )
            .unwrap()),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Garbage) => Ok(b"502 Bad Gateway".to_vec()),
            None => Err(TransportError::Connect(format!("no route to {}", uri))),
        }
    }
}
