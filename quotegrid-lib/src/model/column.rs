//! Column specs and the validated column model

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::api::query::RESERVED_PARAMS;
use crate::error::ColumnError;
use crate::render::Cell;
use crate::render::RenderPolicy;

use super::Row;

/// Which edge of the grid a column sticks to when scrolling horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pinned {
    /// Scrolls with the rest of the grid.
    #[default]
    None,
    /// Fixed to the left edge.
    Left,
    /// Fixed to the right edge.
    Right,
}

fn default_width() -> u16 {
    100
}

/// Static description of one displayable field.
///
/// `key` is the stable identifier used on the wire as sort field and filter
/// parameter name. `field` names the value inside a loaded row and defaults to
/// `key`; backends that key their rows differently from their query
/// parameters set both. `label` is display text only.
///
/// # Example
///
/// ```
/// use quotegrid_lib::model::{ColumnSpec, Pinned};
/// use quotegrid_lib::render::RenderPolicy;
///
/// let spec = ColumnSpec::new("change_pct", "Change %")
///     .sortable()
///     .render(RenderPolicy::SignedPercent);
///
/// assert!(spec.sortable);
/// assert_eq!(spec.pinned, Pinned::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Stable field key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Row data field, when it differs from `key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Display width hint.
    #[serde(default = "default_width")]
    pub width: u16,
    /// Pinning.
    #[serde(default)]
    pub pinned: Pinned,
    /// Whether the server accepts this column as a sort field.
    #[serde(default)]
    pub sortable: bool,
    /// Cell formatting policy.
    #[serde(default)]
    pub render_policy: RenderPolicy,
}

impl ColumnSpec {
    /// Creates an unsortable, unpinned column with the default width.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field: None,
            width: default_width(),
            pinned: Pinned::None,
            sortable: false,
            render_policy: RenderPolicy::None,
        }
    }

    /// Reads cell values from a differently named row field.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Name of the row field holding this column's value.
    pub fn data_field(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.key)
    }

    /// Sets the display width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Pins the column to an edge.
    pub fn pinned(mut self, pinned: Pinned) -> Self {
        self.pinned = pinned;
        self
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets the render policy.
    pub fn render(mut self, policy: RenderPolicy) -> Self {
        self.render_policy = policy;
        self
    }
}

/// An ordered, validated set of [`ColumnSpec`]s.
///
/// Construction fails if two specs share a key or a key collides with a
/// protocol parameter. Once built the model is immutable and is normally
/// shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ColumnModel {
    columns: Vec<ColumnSpec>,
    index: HashMap<String, usize>,
    row_key: String,
}

impl ColumnModel {
    /// Validates and builds a column model.
    ///
    /// The first column becomes the row key; use [`ColumnModel::with_row_key`]
    /// to choose another one.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, ColumnError> {
        let first = columns.first().ok_or(ColumnError::Empty)?.key.clone();

        let mut index = HashMap::with_capacity(columns.len());
        for (i, spec) in columns.iter().enumerate() {
            if RESERVED_PARAMS.contains(&spec.key.as_str()) {
                return Err(ColumnError::ReservedKey {
                    key: spec.key.clone(),
                });
            }
            if index.insert(spec.key.clone(), i).is_some() {
                return Err(ColumnError::duplicate(&spec.key));
            }
        }

        Ok(Self {
            columns,
            index,
            row_key: first,
        })
    }

    /// The default market-quote column set.
    pub fn quotes() -> Self {
        let columns = super::catalog::quote_columns();
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.key.clone(), i))
            .collect();
        Self {
            columns,
            index,
            row_key: super::catalog::QUOTE_ROW_KEY.to_string(),
        }
    }

    /// Chooses the column whose value identifies a row.
    pub fn with_row_key(mut self, key: &str) -> Result<Self, ColumnError> {
        self.resolve(key)?;
        self.row_key = key.to_string();
        Ok(self)
    }

    /// Looks up a column by key.
    pub fn resolve(&self, key: &str) -> Result<&ColumnSpec, ColumnError> {
        self.get(key).ok_or_else(|| ColumnError::unknown(key))
    }

    /// Looks up a column by key, returning `None` when it does not exist.
    pub fn get(&self, key: &str) -> Option<&ColumnSpec> {
        self.index.get(key).map(|&i| &self.columns[i])
    }

    /// Returns `true` if the key names a sortable column.
    pub fn is_sortable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|spec| spec.sortable)
    }

    /// Formats the value of column `key` in `row`.
    ///
    /// Keys without a column read the row field of the same name and are
    /// rendered with [`RenderPolicy::None`].
    pub fn format(&self, key: &str, row: &Row) -> Cell {
        match self.get(key) {
            Some(spec) => spec.render_policy.format(row.value(spec.data_field())),
            None => RenderPolicy::None.format(row.value(key)),
        }
    }

    /// Formats every column of `row` in display order.
    pub fn format_row(&self, row: &Row) -> Vec<Cell> {
        self.columns
            .iter()
            .map(|spec| spec.render_policy.format(row.value(spec.data_field())))
            .collect()
    }

    /// Returns the row key column.
    pub fn row_key(&self) -> &str {
        &self.row_key
    }

    /// Returns the identity of `row`: its row key value as text.
    pub fn row_id(&self, row: &Row) -> String {
        let field = self
            .get(&self.row_key)
            .map(ColumnSpec::data_field)
            .unwrap_or(&self.row_key);
        row.value(field).to_string()
    }

    /// Returns the columns in display order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Returns an iterator over the columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter()
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`: an empty column set is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("code", "Code").pinned(Pinned::Left),
            ColumnSpec::new("volume", "Volume").sortable(),
            ColumnSpec::new("change_pct", "Change %")
                .sortable()
                .render(RenderPolicy::SignedPercent),
        ]
    }

    #[test]
    fn test_resolve() {
        let model = ColumnModel::new(specs()).unwrap();
        assert_eq!(model.resolve("volume").unwrap().label, "Volume");
        assert_eq!(
            model.resolve("missing").unwrap_err(),
            ColumnError::unknown("missing")
        );
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut columns = specs();
        columns.push(ColumnSpec::new("volume", "Volume again"));
        assert_eq!(
            ColumnModel::new(columns).unwrap_err(),
            ColumnError::duplicate("volume")
        );
    }

    #[test]
    fn test_reserved_key_rejected() {
        let err = ColumnModel::new(vec![ColumnSpec::new("pageSize", "Size")]).unwrap_err();
        assert_eq!(err.key(), Some("pageSize"));
        assert!(matches!(err, ColumnError::ReservedKey { .. }));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(ColumnModel::new(Vec::new()).unwrap_err(), ColumnError::Empty);
    }

    #[test]
    fn test_display_order_preserved() {
        let model = ColumnModel::new(specs()).unwrap();
        let keys: Vec<_> = model.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["code", "volume", "change_pct"]);
    }

    #[test]
    fn test_row_key() {
        let model = ColumnModel::new(specs()).unwrap();
        assert_eq!(model.row_key(), "code");

        let model = model.with_row_key("volume").unwrap();
        assert_eq!(model.row_key(), "volume");

        assert!(ColumnModel::new(specs()).unwrap().with_row_key("nope").is_err());
    }

    #[test]
    fn test_sortable_lookup() {
        let model = ColumnModel::new(specs()).unwrap();
        assert!(model.is_sortable("volume"));
        assert!(!model.is_sortable("code"));
        assert!(!model.is_sortable("missing"));
    }

    #[test]
    fn test_format_uses_column_policy() {
        let model = ColumnModel::new(specs()).unwrap();
        let row = Row::new()
            .set("change_pct", 2.35)
            .set("volume", 2.35)
            .set("unmatched", -1);
        assert_eq!(model.format("change_pct", &row).text, "+2.35%");
        assert_eq!(model.format("volume", &row).text, "2.35");
        assert_eq!(model.format("unmatched", &row).text, "-1");
    }

    #[test]
    fn test_data_field_separate_from_key() {
        let model = ColumnModel::new(vec![
            ColumnSpec::new("code", "Code").field("代码"),
            ColumnSpec::new("change_pct", "Change %")
                .field("涨跌幅")
                .render(RenderPolicy::SignedPercent),
            ColumnSpec::new("volume", "Volume"),
        ])
        .unwrap();
        let row = Row::new()
            .set("代码", "600000")
            .set("涨跌幅", -0.5)
            .set("volume", 1200)
            .set("code", "ignored");

        assert_eq!(model.row_id(&row), "600000");
        assert_eq!(model.format("change_pct", &row).text, "-0.5%");
        let texts: Vec<_> = model.format_row(&row).into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["600000", "-0.5%", "1200"]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let spec: ColumnSpec = serde_json::from_str(r#"{"key": "pb", "label": "P/B"}"#).unwrap();
        assert_eq!(spec, ColumnSpec::new("pb", "P/B"));

        let spec: ColumnSpec = serde_json::from_str(
            r#"{"key": "change_amt", "label": "Change", "pinned": "right", "render_policy": "signed_delta"}"#,
        )
        .unwrap();
        assert_eq!(spec.pinned, Pinned::Right);
        assert_eq!(spec.render_policy, RenderPolicy::SignedDelta);
        assert_eq!(spec.data_field(), "change_amt");

        let spec: ColumnSpec =
            serde_json::from_str(r#"{"key": "name", "label": "Name", "field": "名称"}"#).unwrap();
        assert_eq!(spec.data_field(), "名称");
    }
}
