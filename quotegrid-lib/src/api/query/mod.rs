//! View state and query construction.
//!
//! - [`QueryState`] - pagination, sort and filter state owned by the host
//! - [`QueryBuilder`] - maps a `QueryState` to [`OutboundParams`]
//! - [`PageResult`] - one page of rows plus the server-side total

mod builder;
mod order;
mod page;
mod params;
mod state;

pub use builder::MAX_PAGE_SIZE;
pub use builder::QueryBuilder;
pub use order::SortOrder;
pub use page::PageResult;
pub use params::OutboundParams;
pub use state::DEFAULT_PAGE_SIZE;
pub use state::QueryState;

/// Page number parameter (1-based).
pub const PAGE_PARAM: &str = "page";
/// Page size parameter.
pub const PAGE_SIZE_PARAM: &str = "pageSize";
/// Sort field parameter; the value is a column key.
pub const SORT_FIELD_PARAM: &str = "sortField";
/// Sort order parameter; the value is `asc` or `desc`.
pub const SORT_ORDER_PARAM: &str = "sortOrder";

/// Parameter names owned by the protocol. Column keys and extra parameters
/// may not use them.
pub const RESERVED_PARAMS: [&str; 4] = [PAGE_PARAM, PAGE_SIZE_PARAM, SORT_FIELD_PARAM, SORT_ORDER_PARAM];
