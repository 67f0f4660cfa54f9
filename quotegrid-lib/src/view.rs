//! Display projection
//!
//! [`GridView::project`] turns a [`GridSnapshot`] and the column model into
//! plain rows of formatted cells. It is pure; hosts call it whenever the
//! controller publishes a new snapshot.

use serde::Deserialize;
use serde::Serialize;

use crate::api::GridSnapshot;
use crate::api::RequestState;
use crate::api::query::PAGE_PARAM;
use crate::api::query::PageResult;
use crate::error::LoadError;
use crate::model::ColumnModel;
use crate::model::ColumnSpec;
use crate::render::Cell;

/// What the grid shows after a failed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorRows {
    /// Show no rows, only the failure.
    Clear,
    /// Keep showing the last page that loaded.
    #[default]
    Retain,
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// Value of the row key column, as text.
    pub key: String,
    /// Formatted cells in column display order.
    pub cells: Vec<Cell>,
}

/// The grid as the presentation layer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// Columns in display order.
    pub columns: Vec<ColumnSpec>,
    /// Rows to display.
    pub rows: Vec<DisplayRow>,
    /// Total matching rows on the server.
    pub total: u64,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Failure of the current request, if any.
    pub error: Option<LoadError>,
    /// Requested page, once something was submitted.
    pub page: Option<u32>,
    /// Number of pages at the requested page size.
    pub page_count: u32,
}

impl GridView {
    /// Projects a snapshot into display rows.
    pub fn project(snapshot: &GridSnapshot, columns: &ColumnModel, error_rows: ErrorRows) -> Self {
        let source: Option<&PageResult> = match &snapshot.state {
            RequestState::Idle => None,
            RequestState::Success(page) => Some(page),
            RequestState::Error(_) if error_rows == ErrorRows::Clear => None,
            RequestState::Loading(_) | RequestState::Error(_) => snapshot.last_loaded.as_deref(),
        };

        let rows = source
            .map(|page| page.rows().iter().map(|row| project_row(row, columns)).collect())
            .unwrap_or_default();
        let total = source.map(PageResult::total).unwrap_or(0);
        let page_size = match &snapshot.state {
            RequestState::Success(_) => snapshot.page_size(),
            _ => snapshot.loaded_page_size,
        };
        let page_count = match (source, page_size) {
            (Some(page), Some(size)) => page.page_count(size),
            _ => 0,
        };
        let page = snapshot
            .params
            .as_ref()
            .and_then(|p| p.get(PAGE_PARAM))
            .and_then(|v| v.parse().ok());

        Self {
            columns: columns.columns().to_vec(),
            rows,
            total,
            loading: snapshot.state.is_loading(),
            error: snapshot.state.error().cloned(),
            page,
            page_count,
        }
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page.is_some_and(|page| page < self.page_count)
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_prev(&self) -> bool {
        self.page.is_some_and(|page| page > 1)
    }
}

fn project_row(row: &crate::model::Row, columns: &ColumnModel) -> DisplayRow {
    DisplayRow {
        key: columns.row_id(row),
        cells: columns.format_row(row),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::query::OutboundParams;
    use crate::model::Row;
    use crate::render::StyleClass;

    fn params(page: u32, page_size: u32) -> OutboundParams {
        let mut params = OutboundParams::new();
        params.push("page", page.to_string());
        params.push("pageSize", page_size.to_string());
        params
    }

    fn loaded() -> Arc<PageResult> {
        Arc::new(PageResult::new(
            vec![
                Row::new().set("代码", "600000").set("涨跌幅", 2.35),
                Row::new().set("代码", "000001").set("涨跌幅", -1.2),
            ],
            42,
        ))
    }

    fn snapshot(state: RequestState) -> GridSnapshot {
        GridSnapshot {
            current: None,
            params: Some(params(2, 20)),
            state,
            last_loaded: Some(loaded()),
            loaded_page_size: Some(20),
            loaded_at: None,
        }
    }

    #[test]
    fn test_success_projection() {
        let view = GridView::project(
            &snapshot(RequestState::Success(loaded())),
            &ColumnModel::quotes(),
            ErrorRows::Retain,
        );

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.total, 42);
        assert_eq!(view.page, Some(2));
        assert_eq!(view.page_count, 3);
        assert!(view.has_next());
        assert!(view.has_prev());

        let first = &view.rows[0];
        assert_eq!(first.key, "600000");
        assert_eq!(first.cells.len(), view.columns.len());
        assert_eq!(first.cells[0].text, "600000");
        assert_eq!(first.cells[3].text, "+2.35%");
        assert_eq!(first.cells[3].style, StyleClass::Positive);
        assert_eq!(first.cells[1], Cell::placeholder());
        assert_eq!(view.rows[1].cells[3].style, StyleClass::Negative);
    }

    #[test]
    fn test_loading_shows_previous_rows() {
        let view = GridView::project(
            &snapshot(RequestState::Loading(crate::api::Token::from_raw(1))),
            &ColumnModel::quotes(),
            ErrorRows::Clear,
        );
        assert!(view.loading);
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn test_page_count_uses_loaded_page_size_while_loading() {
        let mut loading = snapshot(RequestState::Loading(crate::api::Token::from_raw(2)));
        loading.params = Some(params(1, 50));

        let view = GridView::project(&loading, &ColumnModel::quotes(), ErrorRows::Retain);
        assert_eq!(view.total, 42);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.page, Some(1));
    }

    #[test]
    fn test_error_rows_policy() {
        let failed = snapshot(RequestState::Error(LoadError::network("down")));

        let retained = GridView::project(&failed, &ColumnModel::quotes(), ErrorRows::Retain);
        assert_eq!(retained.rows.len(), 2);
        assert!(retained.error.is_some());

        let cleared = GridView::project(&failed, &ColumnModel::quotes(), ErrorRows::Clear);
        assert!(cleared.rows.is_empty());
        assert_eq!(cleared.total, 0);
        assert!(cleared.error.is_some());
    }

    #[test]
    fn test_idle_is_empty() {
        let view = GridView::project(&GridSnapshot::default(), &ColumnModel::quotes(), ErrorRows::Retain);
        assert!(view.rows.is_empty());
        assert!(!view.loading);
        assert_eq!(view.page, None);
        assert!(!view.has_prev());
    }
}
