//! Page type for grid results.

use crate::model::Row;

/// Number of pages needed to show `total` rows at `page_size` rows per page.
pub(crate) fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One page of rows together with the server-side total.
///
/// # Example
///
/// ```
/// use quotegrid_lib::api::query::PageResult;
/// use quotegrid_lib::model::Row;
///
/// let page = PageResult::new(vec![Row::new().set("code", "600000")], 42);
/// assert_eq!(page.len(), 1);
/// assert_eq!(page.total(), 42);
/// assert_eq!(page.page_count(20), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    rows: Vec<Row>,
    total: u64,
}

impl PageResult {
    /// Creates a page.
    pub fn new(rows: Vec<Row>, total: u64) -> Self {
        Self { rows, total }
    }

    /// Returns the rows of this page.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Total number of rows matching the query, across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pages at the given page size.
    pub fn page_count(&self, page_size: u32) -> u32 {
        page_count(self.total, page_size)
    }
}
