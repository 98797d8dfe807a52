//! HTTP transport backed by reqwest.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::transport::{Transport, TransportError, TransportOptions};

/// reqwest-based transport. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given connect timeout.
    pub fn new(connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client (shared session).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn post(
        &self,
        uri: &str,
        body: &[u8],
        options: &TransportOptions,
    ) -> Result<Vec<u8>, TransportError> {
        let mut request = self
            .client
            .post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec());

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
