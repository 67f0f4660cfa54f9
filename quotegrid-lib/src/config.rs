//! Grid configuration

use std::time::Duration;

use url::Url;

use crate::api::query::MAX_PAGE_SIZE;
use crate::api::query::RESERVED_PARAMS;
use crate::error::ConfigError;
use crate::view::ErrorRows;

/// Default quote endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/v1/stock/all";

/// Runtime settings of a grid client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use quotegrid_lib::GridConfig;
///
/// let config = GridConfig::default()
///     .with_endpoint("https://quotes.example.com/api/v1/stock/all")
///     .with_timeout(Duration::from_secs(5))
///     .with_extra_param("market", "sh");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Absolute URL of the quote endpoint.
    ///
    /// Default: `http://localhost:8080/api/v1/stock/all`
    pub endpoint: String,

    /// Per-request timeout. A timed out request fails with a network failure.
    ///
    /// Default: 10 seconds
    pub timeout: Option<Duration>,

    /// Connection timeout.
    ///
    /// Default: none
    pub connect_timeout: Option<Duration>,

    /// Page size of a fresh view state.
    ///
    /// Default: 20
    pub default_page_size: u32,

    /// Largest page size ever requested.
    ///
    /// Default: 500, the backend's own limit
    pub max_page_size: u32,

    /// Static parameters sent with every request, e.g. `market=sh`.
    pub extra_params: Vec<(String, String)>,

    /// Treat `"data": null` as an empty page instead of a parse failure.
    ///
    /// Default: false
    pub null_data_is_empty: bool,

    /// Rows shown after a failed load.
    ///
    /// Default: [`ErrorRows::Retain`]
    pub error_rows: ErrorRows,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Some(Duration::from_secs(10)),
            connect_timeout: None,
            default_page_size: crate::api::query::DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            extra_params: Vec::new(),
            null_data_is_empty: false,
            error_rows: ErrorRows::Retain,
        }
    }
}

impl GridConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables the request timeout.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the maximum page size.
    pub fn with_max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = size;
        self
    }

    /// Adds a static request parameter.
    pub fn with_extra_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((name.into(), value.into()));
        self
    }

    /// Accepts `"data": null` as an empty page.
    pub fn with_null_data_is_empty(mut self, enabled: bool) -> Self {
        self.null_data_is_empty = enabled;
        self
    }

    /// Sets the rows shown after a failed load.
    pub fn with_error_rows(mut self, error_rows: ErrorRows) -> Self {
        self.error_rows = error_rows;
        self
    }

    /// Checks the settings and returns the parsed endpoint.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let endpoint = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        if self.max_page_size == 0 {
            return Err(ConfigError::InvalidPageSize {
                size: self.max_page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidPageSize {
                size: self.default_page_size,
                max: self.max_page_size,
            });
        }

        if let Some((name, _)) = self
            .extra_params
            .iter()
            .find(|(name, _)| RESERVED_PARAMS.contains(&name.as_str()))
        {
            return Err(ConfigError::ReservedParam { name: name.clone() });
        }

        Ok(endpoint)
    }
}
