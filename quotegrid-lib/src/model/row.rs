//! Quote row

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// A single row of the quote grid.
///
/// Rows are accepted from the server verbatim: the field set is whatever the
/// response carried, usually a superset of the configured column keys.
/// Rows are immutable once mapped; the builder-style [`Row::set`] exists for
/// constructing fixtures and mock responses.
///
/// # Example
///
/// ```
/// use quotegrid_lib::model::Row;
///
/// let row = Row::new()
///     .set("code", "600000")
///     .set("change_pct", 1.1);
///
/// assert_eq!(row.get("change_pct").and_then(|v| v.as_f64()), Some(1.1));
/// assert!(row.get("volume").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, returning the row.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, treating a missing field as null.
    pub fn value(&self, field: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.fields.get(field).unwrap_or(NULL)
    }

    /// Returns `true` if the row has the field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns an iterator over field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns an iterator over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(k, v)| {
                let value = serde_json::from_value(v.clone()).unwrap_or(Value::Json(v));
                (k, value)
            })
            .collect();
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_object() {
        let json = serde_json::json!({
            "code": "600000",
            "change_pct": 1.1,
            "volume": 1200,
            "pe_dynamic": null,
            "flags": [1, 2]
        });
        let serde_json::Value::Object(map) = json else {
            panic!("expected object");
        };
        let row = Row::from(map);

        assert_eq!(row.len(), 5);
        assert_eq!(row.get("code"), Some(&Value::from("600000")));
        assert_eq!(row.get("volume"), Some(&Value::Integer(1200)));
        assert_eq!(row.get("pe_dynamic"), Some(&Value::Null));
        assert!(matches!(row.get("flags"), Some(Value::Json(_))));
    }

    #[test]
    fn test_missing_field_is_null() {
        let row = Row::new().set("code", "000001");
        assert!(row.value("name").is_null());
        assert!(!row.contains("name"));
    }

    #[test]
    fn test_keys_are_sorted() {
        let row = Row::new().set("name", "x").set("code", "y");
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["code", "name"]);
    }
}
