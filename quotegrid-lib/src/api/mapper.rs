//! Response body validation
//!
//! The quote endpoint answers with `{ "data": [ {...}, ... ], "total": <int> }`.
//! [`ResultMapper`] checks that shape and turns it into a [`PageResult`].

use serde_json::Value as Json;

use crate::api::query::PageResult;
use crate::error::LoadError;
use crate::model::Row;

/// Validates response bodies and maps them into [`PageResult`]s.
///
/// By default the mapper is strict: `data` must be an array of objects and
/// `total` a non-negative integer. The quote backend serializes an empty
/// result set as `"data": null`; [`ResultMapper::null_data_is_empty`] accepts
/// that as an empty page.
///
/// # Example
///
/// ```
/// use quotegrid_lib::api::ResultMapper;
///
/// let body = serde_json::json!({
///     "data": [{ "code": "600000", "change_pct": 1.1 }],
///     "total": 42
/// });
///
/// let page = ResultMapper::new().map(body).unwrap();
/// assert_eq!(page.len(), 1);
/// assert_eq!(page.total(), 42);
///
/// let err = ResultMapper::new().map(serde_json::json!({ "total": 5 })).unwrap_err();
/// assert!(err.is_parse());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMapper {
    null_data_is_empty: bool,
    page_size: Option<u32>,
}

impl ResultMapper {
    /// Creates a strict mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `"data": null` as an empty page.
    pub fn null_data_is_empty(mut self, enabled: bool) -> Self {
        self.null_data_is_empty = enabled;
        self
    }

    /// Rejects pages with more rows than were requested.
    pub fn expect_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Validates a response body and maps it into a page.
    pub fn map(&self, body: Json) -> Result<PageResult, LoadError> {
        let Json::Object(mut body) = body else {
            return Err(LoadError::parse("response body is not a JSON object"));
        };

        let total = match body.get("total") {
            Some(total) => total
                .as_u64()
                .ok_or_else(|| LoadError::parse(format!("'total' is not a non-negative integer: {}", total)))?,
            None => return Err(LoadError::parse("response is missing 'total'")),
        };

        let rows = match body.remove("data") {
            Some(Json::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Json::Object(fields) => Ok(Row::from(fields)),
                    other => Err(LoadError::parse(format!(
                        "'data[{}]' is not an object: {}",
                        i, other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(Json::Null) if self.null_data_is_empty => Vec::new(),
            Some(other) => {
                return Err(LoadError::parse(format!("'data' is not an array: {}", other)));
            }
            None => return Err(LoadError::parse("response is missing 'data'")),
        };

        if let Some(page_size) = self.page_size.filter(|&size| rows.len() > size as usize) {
            return Err(LoadError::parse(format!(
                "page holds {} rows, requested at most {}",
                rows.len(),
                page_size
            )));
        }

        Ok(PageResult::new(rows, total))
    }

    /// Parses a raw body and maps it.
    pub fn map_text(&self, text: &str) -> Result<PageResult, LoadError> {
        let body: Json = serde_json::from_str(text)
            .map_err(|e| LoadError::parse_with_body(format!("invalid JSON: {}", e), text))?;
        self.map(body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Value;

    #[test]
    fn test_maps_rows_and_total() {
        let page = ResultMapper::new()
            .map(json!({
                "data": [
                    { "code": "600000", "change_pct": 1.1 },
                    { "code": "000001", "change_pct": -0.5, "extra": "kept" }
                ],
                "total": 42,
                "page": 1
            }))
            .unwrap();

        assert_eq!(page.total(), 42);
        assert_eq!(page.len(), 2);
        assert_eq!(page.rows()[1].get("extra"), Some(&Value::from("kept")));
    }

    #[test]
    fn test_missing_data_is_parse_failure() {
        let err = ResultMapper::new().map(json!({ "total": 5 })).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_missing_or_invalid_total() {
        let mapper = ResultMapper::new();
        assert!(mapper.map(json!({ "data": [] })).unwrap_err().is_parse());
        assert!(mapper.map(json!({ "data": [], "total": -1 })).unwrap_err().is_parse());
        assert!(mapper.map(json!({ "data": [], "total": 1.5 })).unwrap_err().is_parse());
        assert!(mapper.map(json!({ "data": [], "total": "3" })).unwrap_err().is_parse());
    }

    #[test]
    fn test_data_must_be_array_of_objects() {
        let mapper = ResultMapper::new();
        assert!(mapper.map(json!({ "data": {}, "total": 0 })).is_err());
        assert!(mapper.map(json!({ "data": [1, 2], "total": 2 })).is_err());
        assert!(mapper.map(json!([])).is_err());
    }

    #[test]
    fn test_null_data() {
        let body = json!({ "data": null, "total": 0 });
        assert!(ResultMapper::new().map(body.clone()).is_err());

        let page = ResultMapper::new().null_data_is_empty(true).map(body).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 0);
    }

    #[test]
    fn test_oversized_page_rejected() {
        let body = json!({ "data": [{}, {}, {}], "total": 3 });
        assert!(ResultMapper::new().expect_page_size(2).map(body.clone()).is_err());
        assert!(ResultMapper::new().expect_page_size(3).map(body).is_ok());
    }

    #[test]
    fn test_map_text_keeps_body() {
        let err = ResultMapper::new().map_text("<html>").unwrap_err();
        match err {
            LoadError::ParseFailure { body, .. } => assert_eq!(body.as_deref(), Some("<html>")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
