//! Grid view state.

use std::collections::BTreeMap;

use super::SortOrder;
use super::page::page_count;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Pagination, sort and filter state of the grid.
///
/// The host owns exactly one `QueryState` and mutates it in response to user
/// events (page turn, sort click, filter submit). Each change is handed to
/// [`QueryBuilder::build`](super::QueryBuilder::build) by value; the engine
/// never keeps a reference to it.
///
/// The transition methods mirror how a paginated table widget behaves:
/// changing the page size or the filters returns to the first page, and
/// clicking a sortable header cycles ascending, descending, unsorted.
///
/// # Example
///
/// ```
/// use quotegrid_lib::api::query::{QueryState, SortOrder};
///
/// let mut state = QueryState::new(50);
/// state.cycle_sort("volume");
/// state.cycle_sort("volume");
/// assert_eq!(state.sort_field.as_deref(), Some("volume"));
/// assert_eq!(state.sort_order, SortOrder::Desc);
///
/// state.set_filter("code", "600");
/// assert_eq!(state.page, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Sort column key, if sorting is active.
    pub sort_field: Option<String>,
    /// Sort direction; meaningful only while `sort_field` is set.
    pub sort_order: SortOrder,
    /// Filter values keyed by column key.
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// Creates a state on the first page with no sort or filters.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            sort_field: None,
            sort_order: SortOrder::Asc,
            filters: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Builder-style constructors
    // =========================================================================

    /// Sets the page, returning the state.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the sort, returning the state.
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by(field, order);
        self
    }

    /// Adds a filter, returning the state. Empty values are ignored.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_filter(field.into(), value.into());
        self
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Moves to a page. Page numbers below 1 become 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Quick-jumps to a page, clamped to the pages available for `total` rows.
    pub fn go_to_page(&mut self, page: u32, total: u64) {
        let last = page_count(total, self.page_size).max(1);
        self.page = page.clamp(1, last);
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sorts by a column.
    pub fn sort_by(&mut self, field: impl Into<String>, order: SortOrder) {
        self.sort_field = Some(field.into());
        self.sort_order = order;
    }

    /// Removes sorting.
    pub fn clear_sort(&mut self) {
        self.sort_field = None;
        self.sort_order = SortOrder::Asc;
    }

    /// Header click: ascending, then descending, then unsorted.
    ///
    /// Clicking a different column starts again at ascending.
    pub fn cycle_sort(&mut self, field: &str) {
        match (self.sort_field.as_deref(), self.sort_order) {
            (Some(current), SortOrder::Asc) if current == field => {
                self.sort_order = SortOrder::Desc;
            }
            (Some(current), SortOrder::Desc) if current == field => self.clear_sort(),
            _ => self.sort_by(field, SortOrder::Asc),
        }
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Sets or clears one filter and returns to the first page.
    ///
    /// A blank value removes the filter.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.insert_filter(field.into(), value.into());
        self.page = 1;
    }

    /// Replaces all filters with a submitted search form and returns to the
    /// first page.
    pub fn submit_filters<I, K, V>(&mut self, filters: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.filters.clear();
        for (field, value) in filters {
            self.insert_filter(field.into(), value.into());
        }
        self.page = 1;
    }

    /// Clears all filters and returns to the first page.
    pub fn reset_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Returns the filters that carry a value.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| !is_blank(v))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert_filter(&mut self, field: String, value: String) {
        if is_blank(&value) {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, value);
        }
    }
}

/// A filter value that means "no filter".
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
