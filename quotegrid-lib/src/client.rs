//! Main QuoteGridClient

use std::sync::Arc;

use crate::api::GridSnapshot;
use crate::api::RequestController;
use crate::api::RequestState;
use crate::api::ResultMapper;
use crate::api::Token;
use crate::api::query::QueryBuilder;
use crate::api::query::QueryState;
use crate::config::GridConfig;
use crate::error::Error;
use crate::model::ColumnModel;
use crate::transport::HttpTransport;
use crate::transport::Transport;
use crate::view::GridView;

/// The grid engine as seen by a host.
///
/// Wires the column model, query builder, request controller and transport
/// together. Cheap to clone (uses `Arc` internally); clones share state.
///
/// # Example
///
/// ```ignore
/// use quotegrid_lib::QuoteGridClient;
///
/// let grid = QuoteGridClient::builder()
///     .endpoint("http://localhost:8080/api/v1/stock/all")
///     .build()?;
///
/// let mut query = grid.new_query();
/// query.cycle_sort("change_pct");
/// grid.submit(query);
///
/// grid.wait_settled().await;
/// for row in grid.view().rows {
///     println!("{}", row.key);
/// }
/// ```
#[derive(Clone)]
pub struct QuoteGridClient {
    inner: Arc<QuoteGridClientInner>,
}

struct QuoteGridClientInner {
    columns: Arc<ColumnModel>,
    controller: RequestController,
    config: GridConfig,
}

impl QuoteGridClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> QuoteGridClientBuilder<Missing> {
        QuoteGridClientBuilder::new()
    }

    /// Creates a builder with every setting, including the endpoint, taken
    /// from `config`.
    pub fn from_config(config: GridConfig) -> QuoteGridClientBuilder<Set<String>> {
        let endpoint = config.endpoint.clone();
        QuoteGridClientBuilder::new().config(config).endpoint(endpoint)
    }

    /// Returns a fresh view state using the configured page size.
    pub fn new_query(&self) -> QueryState {
        QueryState::new(self.inner.config.default_page_size)
    }

    /// Submits a view state. The returned token identifies the request in logs.
    pub fn submit(&self, query: QueryState) -> Token {
        self.inner.controller.submit(query)
    }

    /// Submits a view state and waits for its outcome.
    pub async fn load(&self, query: QueryState) -> RequestState {
        self.submit(query);
        self.wait_settled().await
    }

    /// Waits for the current request to settle.
    pub async fn wait_settled(&self) -> RequestState {
        self.inner.controller.wait_settled().await
    }

    /// Returns the current load state.
    pub fn state(&self) -> RequestState {
        self.inner.controller.state()
    }

    /// Returns the full grid snapshot.
    pub fn snapshot(&self) -> GridSnapshot {
        self.inner.controller.snapshot()
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<GridSnapshot> {
        self.inner.controller.subscribe()
    }

    /// Projects the current snapshot for display.
    pub fn view(&self) -> GridView {
        self.project(&self.snapshot())
    }

    /// Projects a snapshot received from [`QuoteGridClient::subscribe`].
    pub fn project(&self, snapshot: &GridSnapshot) -> GridView {
        GridView::project(snapshot, &self.inner.columns, self.inner.config.error_rows)
    }

    /// Returns the column model.
    pub fn columns(&self) -> &ColumnModel {
        &self.inner.columns
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GridConfig {
        &self.inner.config
    }

    /// Returns the underlying request controller.
    pub fn controller(&self) -> &RequestController {
        &self.inner.controller
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`QuoteGridClient`].
///
/// The endpoint is required and enforced at compile time. Columns default to
/// [`ColumnModel::quotes`] and the transport to an [`HttpTransport`] honoring
/// the configured timeouts.
pub struct QuoteGridClientBuilder<Endpoint> {
    endpoint: Endpoint,
    config: GridConfig,
    columns: Option<ColumnModel>,
    transport: Option<Arc<dyn Transport>>,
}

impl QuoteGridClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: Missing,
            config: GridConfig::default(),
            columns: None,
            transport: None,
        }
    }
}

impl Default for QuoteGridClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteGridClientBuilder<Missing> {
    /// Sets the quote endpoint URL.
    pub fn endpoint(self, endpoint: impl Into<String>) -> QuoteGridClientBuilder<Set<String>> {
        QuoteGridClientBuilder {
            endpoint: Set(endpoint.into()),
            config: self.config,
            columns: self.columns,
            transport: self.transport,
        }
    }
}

impl<E> QuoteGridClientBuilder<E> {
    /// Sets the configuration. Its `endpoint` is ignored in favor of
    /// [`QuoteGridClientBuilder::endpoint`].
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the column model.
    pub fn columns(mut self, columns: ColumnModel) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Sets a custom transport.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl QuoteGridClientBuilder<Set<String>> {
    /// Builds the [`QuoteGridClient`].
    ///
    /// Fails if the configuration does not validate.
    pub fn build(self) -> Result<QuoteGridClient, Error> {
        let mut config = self.config;
        config.endpoint = self.endpoint.0;
        let endpoint = config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(http_transport(&config)?),
        };

        let columns = Arc::new(self.columns.unwrap_or_else(ColumnModel::quotes));
        let builder = QueryBuilder::new(Arc::clone(&columns))
            .with_max_page_size(config.max_page_size)
            .with_extra_params(config.extra_params.iter().cloned());
        let mapper = ResultMapper::new().null_data_is_empty(config.null_data_is_empty);
        let controller = RequestController::with_mapper(endpoint, builder, transport, mapper);

        Ok(QuoteGridClient {
            inner: Arc::new(QuoteGridClientInner {
                columns,
                controller,
                config,
            }),
        })
    }
}

fn http_transport(config: &GridConfig) -> Result<HttpTransport, Error> {
    let transport = match config.connect_timeout {
        Some(connect_timeout) => HttpTransport::with_connect_timeout(connect_timeout)?,
        None => HttpTransport::new(),
    };
    Ok(match config.timeout {
        Some(timeout) => transport.timeout(timeout),
        None => transport,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ConfigError;
    use crate::error::LoadError;
    use crate::model::ColumnSpec;
    use crate::transport::StaticTransport;
    use crate::view::ErrorRows;

    fn quotes() -> StaticTransport {
        StaticTransport::new(json!({
            "data": [{ "代码": "600000", "涨跌幅": 1.1 }],
            "total": 42
        }))
    }

    #[test]
    fn test_build_rejects_bad_endpoint() {
        let result = QuoteGridClient::builder().endpoint("nope").transport(quotes()).build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidEndpoint { .. }))
        ));
    }

    #[test]
    fn test_from_config_uses_config_values() {
        let config = GridConfig::default()
            .with_endpoint("http://quotes.test/all")
            .with_default_page_size(50);
        let grid = QuoteGridClient::from_config(config).transport(quotes()).build().unwrap();

        assert_eq!(grid.new_query().page_size, 50);
        assert_eq!(grid.controller().endpoint().as_str(), "http://quotes.test/all");
        assert_eq!(grid.columns().len(), 18);
    }

    #[tokio::test]
    async fn test_load_and_view() {
        let grid = QuoteGridClient::builder()
            .endpoint("http://quotes.test/all")
            .transport(quotes())
            .build()
            .unwrap();

        let state = grid.load(grid.new_query()).await;
        assert_eq!(state.page().map(|p| p.total()), Some(42));

        let view = grid.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].key, "600000");
        assert_eq!(view.total, 42);
    }

    #[tokio::test]
    async fn test_custom_columns_and_error_rows() {
        let columns = ColumnModel::new(vec![ColumnSpec::new("code", "Code")]).unwrap();
        let grid = QuoteGridClient::builder()
            .endpoint("http://quotes.test/all")
            .columns(columns)
            .config(GridConfig::default().with_error_rows(ErrorRows::Clear))
            .transport(StaticTransport::failing(LoadError::http(500, "upstream down")))
            .build()
            .unwrap();

        let state = grid.load(grid.new_query()).await;
        assert_eq!(state.error().and_then(LoadError::status_code), Some(500));

        let view = grid.view();
        assert_eq!(view.columns.len(), 1);
        assert!(view.rows.is_empty());
        assert!(view.error.is_some());
    }
}
