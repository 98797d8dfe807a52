//! Mock JSON-RPC backends for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Handle to a running mock backend.
#[allow(dead_code)]
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// JSON-RPC success body echoing the request id.
#[allow(dead_code)]
pub fn result_body(request: &Value, result: Value) -> String {
    json!({"jsonrpc": "2.0", "id": request["id"], "result": result}).to_string()
}

/// JSON-RPC error body echoing the request id.
#[allow(dead_code)]
pub fn error_body(request: &Value, code: i64, message: &str) -> String {
    json!({"jsonrpc": "2.0", "id": request["id"], "error": {"code": code, "message": message}})
        .to_string()
}

/// Start a backend that always answers with the given result.
#[allow(dead_code)]
pub async fn start_result_backend(result: Value) -> MockBackend {
    start_programmable_backend(move |request| {
        let body = result_body(&request, result.clone());
        async move { (200, body) }
    })
    .await
}

/// Start a backend that always answers with the given HTTP status.
#[allow(dead_code)]
pub async fn start_status_backend(status: u16) -> MockBackend {
    start_programmable_backend(move |_| async move { (status, "unavailable".to_string()) }).await
}

/// Address nothing listens on.
#[allow(dead_code)]
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Start a programmable backend. The handler receives the decoded JSON-RPC request.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let f = Arc::new(f);

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let Some(body) = read_request_body(&mut socket).await else {
                            return;
                        };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, hits }
}

/// Read one HTTP request and return its body.
async fn read_request_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(buf[header_end..].to_vec())
}
