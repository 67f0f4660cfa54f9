//! Maps view state to request parameters.

use std::sync::Arc;

use log::trace;
use log::warn;

use crate::model::ColumnModel;

use super::OutboundParams;
use super::PAGE_PARAM;
use super::PAGE_SIZE_PARAM;
use super::QueryState;
use super::SORT_FIELD_PARAM;
use super::SORT_ORDER_PARAM;

/// Largest page size the quote backend serves.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Translates a [`QueryState`] into [`OutboundParams`].
///
/// Building never fails. State that cannot be expressed on the wire is left
/// out rather than rejected:
///
/// - a sort on an unknown or unsortable column sends no sort parameters,
/// - blank filter values are not sent,
/// - filters on unknown columns are not sent.
///
/// Each omission is logged at `warn` level, except blank filters which are
/// the normal "no filter" case.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use quotegrid_lib::api::query::{QueryBuilder, QueryState, SortOrder};
/// use quotegrid_lib::model::ColumnModel;
///
/// let builder = QueryBuilder::new(Arc::new(ColumnModel::quotes()));
/// let state = QueryState::new(20)
///     .with_page(2)
///     .with_sort("volume", SortOrder::Desc);
///
/// let params = builder.build(state);
/// assert_eq!(params.to_query_string(), "page=2&pageSize=20&sortField=volume&sortOrder=desc");
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    columns: Arc<ColumnModel>,
    max_page_size: u32,
    extra_params: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Creates a builder validating against the given columns.
    pub fn new(columns: Arc<ColumnModel>) -> Self {
        Self {
            columns,
            max_page_size: MAX_PAGE_SIZE,
            extra_params: Vec::new(),
        }
    }

    /// Sets the largest page size that will be requested.
    pub fn with_max_page_size(mut self, max: u32) -> Self {
        self.max_page_size = max.max(1);
        self
    }

    /// Sets static parameters appended to every request.
    pub fn with_extra_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra_params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Returns the column model used for validation.
    pub fn columns(&self) -> &Arc<ColumnModel> {
        &self.columns
    }

    /// Builds the request parameters for a view state.
    pub fn build(&self, state: QueryState) -> OutboundParams {
        let mut params = OutboundParams::new();

        params.push(PAGE_PARAM, state.page.max(1).to_string());
        params.push(
            PAGE_SIZE_PARAM,
            state.page_size.clamp(1, self.max_page_size).to_string(),
        );

        if let Some(field) = state.sort_field.as_deref() {
            if self.columns.is_sortable(field) {
                params.push(SORT_FIELD_PARAM, field);
                params.push(SORT_ORDER_PARAM, state.sort_order.as_str());
            } else {
                warn!("Dropping sort on '{}': not a sortable column", field);
            }
        }

        for (field, value) in state.active_filters() {
            if self.columns.get(field).is_none() {
                warn!("Dropping filter on '{}': not a known column", field);
                continue;
            }
            params.push(field, value.trim());
        }

        for (name, value) in &self.extra_params {
            if !params.contains(name) {
                params.push(name.as_str(), value.as_str());
            }
        }

        trace!("Built grid query: {}", params);
        params
    }
}
