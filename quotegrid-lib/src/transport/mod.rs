//! Transport abstraction
//!
//! The engine does not talk HTTP directly. It hands an endpoint and the
//! built [`OutboundParams`] to a [`Transport`] and gets a JSON body or a
//! [`LoadError`] back. [`HttpTransport`] is the `reqwest` implementation;
//! [`StaticTransport`] answers every request with the same body.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use url::Url;

use crate::api::query::OutboundParams;
use crate::error::LoadError;

/// Fetches one page of quote data.
///
/// Implementations must not retry on their own: the controller treats every
/// error as final for that request and the host decides whether to re-submit.
/// A timeout, if any, is the transport's business and must surface as
/// [`LoadError::NetworkFailure`].
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use quotegrid_lib::api::query::OutboundParams;
/// use quotegrid_lib::error::LoadError;
/// use quotegrid_lib::transport::Transport;
/// use url::Url;
///
/// struct Offline;
///
/// #[async_trait]
/// impl Transport for Offline {
///     async fn fetch(&self, _endpoint: &Url, _params: &OutboundParams) -> Result<serde_json::Value, LoadError> {
///         Err(LoadError::network("offline"))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues `GET endpoint?params` and returns the decoded JSON body.
    async fn fetch(&self, endpoint: &Url, params: &OutboundParams) -> Result<serde_json::Value, LoadError>;
}

/// A transport that always returns the same result.
///
/// Useful for tests and demos that do not need a server.
#[derive(Debug, Clone)]
pub struct StaticTransport {
    result: Result<serde_json::Value, LoadError>,
}

impl StaticTransport {
    /// Answers every request with this body.
    pub fn new(body: serde_json::Value) -> Self {
        Self { result: Ok(body) }
    }

    /// Fails every request with this error.
    pub fn failing(error: LoadError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn fetch(&self, _endpoint: &Url, _params: &OutboundParams) -> Result<serde_json::Value, LoadError> {
        self.result.clone()
    }
}
