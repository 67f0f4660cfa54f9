//! Request dispatch with latest-wins ordering
//!
//! Every submitted query gets a [`Token`] from a process-wide counter and
//! becomes the current request. When a fetch completes, its outcome is
//! applied only if its token is still current; results of superseded
//! requests are dropped, whatever order they arrive in. In-flight transport
//! calls are never aborted, only ignored.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Utc;
use log::debug;
use log::warn;
use tokio::sync::watch;
use url::Url;

use crate::api::ResultMapper;
use crate::api::query::OutboundParams;
use crate::api::query::PAGE_SIZE_PARAM;
use crate::api::query::PageResult;
use crate::api::query::QueryBuilder;
use crate::api::query::QueryState;
use crate::error::LoadError;
use crate::transport::Transport;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Sequence number of one submitted query.
///
/// Tokens are unique and increase monotonically across the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

impl Token {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(n: u64) -> Self {
        Self(n)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Load state of the grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// The request with this token is in flight.
    Loading(Token),
    /// The current request succeeded.
    Success(Arc<PageResult>),
    /// The current request failed.
    Error(LoadError),
}

impl RequestState {
    /// Returns `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Returns `true` once the current request has an outcome.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    /// Returns the loaded page, if the current request succeeded.
    pub fn page(&self) -> Option<&PageResult> {
        match self {
            Self::Success(page) => Some(page),
            _ => None,
        }
    }

    /// Returns the error, if the current request failed.
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Everything the host needs to draw the grid.
///
/// Published through a `watch` channel on every state change.
#[derive(Debug, Clone, Default)]
pub struct GridSnapshot {
    /// Token of the most recently submitted request.
    pub current: Option<Token>,
    /// Parameters of the most recently submitted request.
    pub params: Option<OutboundParams>,
    /// Load state of the current request.
    pub state: RequestState,
    /// Last page that loaded successfully, for display while loading or
    /// after a failure.
    pub last_loaded: Option<Arc<PageResult>>,
    /// Page size `last_loaded` was requested with.
    pub loaded_page_size: Option<u32>,
    /// When `last_loaded` arrived.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl GridSnapshot {
    /// Page size of the current request.
    pub fn page_size(&self) -> Option<u32> {
        self.params
            .as_ref()
            .and_then(|p| p.get(PAGE_SIZE_PARAM))
            .and_then(|v| v.parse().ok())
    }
}

/// Issues grid queries and owns the resulting state.
///
/// Cheap to clone; clones share the same current token and state.
///
/// # Example
///
/// ```ignore
/// let controller = RequestController::new(endpoint, builder, Arc::new(HttpTransport::new()));
///
/// let token = controller.submit(QueryState::default());
/// match controller.wait_settled().await {
///     RequestState::Success(page) => println!("{} of {} rows", page.len(), page.total()),
///     RequestState::Error(err) => eprintln!("load {} failed: {}", token, err),
///     _ => {}
/// }
/// ```
#[derive(Clone)]
pub struct RequestController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    endpoint: Url,
    builder: QueryBuilder,
    mapper: ResultMapper,
    transport: Arc<dyn Transport>,
    state: watch::Sender<GridSnapshot>,
}

impl RequestController {
    /// Creates a controller fetching from `endpoint` through `transport`.
    pub fn new(endpoint: Url, builder: QueryBuilder, transport: Arc<dyn Transport>) -> Self {
        Self::with_mapper(endpoint, builder, transport, ResultMapper::new())
    }

    /// Creates a controller with a custom response mapper.
    pub fn with_mapper(
        endpoint: Url,
        builder: QueryBuilder,
        transport: Arc<dyn Transport>,
        mapper: ResultMapper,
    ) -> Self {
        let (state, _) = watch::channel(GridSnapshot::default());
        Self {
            inner: Arc::new(ControllerInner {
                endpoint,
                builder,
                mapper,
                transport,
                state,
            }),
        }
    }

    /// Builds the query for a view state and submits it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, query: QueryState) -> Token {
        let params = self.inner.builder.build(query);
        self.submit_params(params)
    }

    /// Submits pre-built parameters, spawning the fetch onto the runtime.
    ///
    /// The returned token is current as soon as this returns.
    pub fn submit_params(&self, params: OutboundParams) -> Token {
        let (token, fetch) = self.dispatch(params);
        tokio::spawn(fetch);
        token
    }

    /// Makes `params` the current request and returns the fetch to drive.
    ///
    /// The state moves to `Loading` immediately. The returned future performs
    /// the fetch and applies its outcome if the token is still current when
    /// it completes. [`RequestController::submit_params`] spawns it; callers
    /// with their own executor can drive it directly.
    pub fn dispatch(&self, params: OutboundParams) -> (Token, impl Future<Output = ()> + Send + 'static) {
        let token = self.inner.begin(&params);
        debug!("Submitted grid query {}: {}", token, params);

        let inner = Arc::clone(&self.inner);
        let fetch = async move {
            let mapper = match params.get(PAGE_SIZE_PARAM).and_then(|v| v.parse().ok()) {
                Some(page_size) => inner.mapper.expect_page_size(page_size),
                None => inner.mapper,
            };
            let outcome = inner
                .transport
                .fetch(&inner.endpoint, &params)
                .await
                .and_then(|body| mapper.map(body));
            inner.complete(token, outcome);
        };

        (token, fetch)
    }

    /// Returns the current load state.
    pub fn state(&self) -> RequestState {
        self.inner.state.borrow().state.clone()
    }

    /// Returns a copy of the full grid snapshot.
    pub fn snapshot(&self) -> GridSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Returns the token of the most recent submission.
    pub fn current_token(&self) -> Option<Token> {
        self.inner.state.borrow().current
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<GridSnapshot> {
        self.inner.state.subscribe()
    }

    /// Waits until the current request (at the time of each check) has an
    /// outcome, and returns the resulting state.
    ///
    /// Returns immediately when nothing is in flight.
    pub async fn wait_settled(&self) -> RequestState {
        let mut rx = self.inner.state.subscribe();
        match rx.wait_for(|snapshot| !snapshot.state.is_loading()).await {
            Ok(snapshot) => snapshot.state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Returns the endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Returns the query builder.
    pub fn builder(&self) -> &QueryBuilder {
        &self.inner.builder
    }
}

impl ControllerInner {
    fn begin(&self, params: &OutboundParams) -> Token {
        let mut issued = None;
        self.state.send_modify(|snapshot| {
            // Allocated under the channel lock so `current` never moves backwards.
            let token = Token::next();
            snapshot.current = Some(token);
            snapshot.params = Some(params.clone());
            snapshot.state = RequestState::Loading(token);
            issued = Some(token);
        });
        issued.unwrap_or_else(Token::next)
    }

    fn complete(&self, token: Token, outcome: Result<PageResult, LoadError>) {
        let summary = match &outcome {
            Ok(page) => Ok((page.len(), page.total())),
            Err(err) => Err(err.to_string()),
        };

        let applied = self.state.send_if_modified(move |snapshot| {
            if snapshot.current != Some(token) {
                return false;
            }
            snapshot.state = match outcome {
                Ok(page) => {
                    let page = Arc::new(page);
                    snapshot.last_loaded = Some(Arc::clone(&page));
                    snapshot.loaded_page_size = snapshot.page_size();
                    snapshot.loaded_at = Some(Utc::now());
                    RequestState::Success(page)
                }
                Err(err) => RequestState::Error(err),
            };
            true
        });

        match (applied, summary) {
            (false, _) => debug!("Discarding stale result for grid query {}", token),
            (true, Ok((rows, total))) => {
                debug!("Grid query {} loaded {} rows (total {})", token, rows, total)
            }
            (true, Err(err)) => warn!("Grid query {} failed: {}", token, err),
        }
    }
}
