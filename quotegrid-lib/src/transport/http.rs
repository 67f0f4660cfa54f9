//! `reqwest` transport

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::Transport;
use crate::api::query::OutboundParams;
use crate::error::LoadError;

/// Error body the quote backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP transport backed by a shared `reqwest` client.
///
/// The client is cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use quotegrid_lib::transport::HttpTransport;
///
/// let transport = HttpTransport::new().timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport with a default client and no timeout.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates a transport using a custom client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Builds a client with the given connection timeout.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| LoadError::network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client))
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn map_send_error(&self, err: reqwest::Error) -> LoadError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => LoadError::timeout(timeout),
            _ => LoadError::from(err),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, endpoint: &Url, params: &OutboundParams) -> Result<serde_json::Value, LoadError> {
        let url = params.apply_to(endpoint);
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(LoadError::http(status.as_u16(), message));
        }

        serde_json::from_str(&text)
            .map_err(|e| LoadError::parse_with_body(format!("Invalid JSON: {}", e), text))
    }
}
