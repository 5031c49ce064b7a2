//! Content Model
//!
//! In-memory content is one of three closed shapes:
//! - Table: named columns of scalar cells
//! - Mapping: a single JSON object
//! - Mapping list: an ordered sequence of JSON objects
//!
//! Anything else is rejected at classification time.

mod format;
mod table;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{LakeError, Result};

pub use format::{validate_format, Format};
pub use table::Table;

/// A single key-value record.
pub type Mapping = Map<String, Value>;

/// Closed tag over the shape of in-memory content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    /// Tabular, columnar data
    Table,
    /// Single key-value record
    Mapping,
    /// Ordered sequence of key-value records
    MappingList,
}

impl ContentType {
    /// Stable name used in persisted metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Table => "TABLE",
            ContentType::Mapping => "MAPPING",
            ContentType::MappingList => "MAPPING_LIST",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content held by a layer entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Table(Table),
    Mapping(Mapping),
    MappingList(Vec<Mapping>),
}

impl Content {
    /// The content-type tag of this value.
    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Table(_) => ContentType::Table,
            Content::Mapping(_) => ContentType::Mapping,
            Content::MappingList(_) => ContentType::MappingList,
        }
    }

    /// Classify a JSON value into content.
    ///
    /// Objects become mappings; arrays whose elements are all objects become
    /// mapping lists (an empty array included). Everything else fails with
    /// [`LakeError::NotCoveredContentType`].
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mapping) => Ok(Content::Mapping(mapping)),
            Value::Array(items) if items.iter().all(Value::is_object) => Ok(Content::MappingList(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(mapping) => Some(mapping),
                        _ => None,
                    })
                    .collect(),
            )),
            other => Err(not_covered(&other)),
        }
    }

    /// JSON view of mapping content; `None` for tables.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Content::Table(_) => None,
            Content::Mapping(mapping) => Some(Value::Object(mapping.clone())),
            Content::MappingList(items) => Some(Value::Array(
                items.iter().cloned().map(Value::Object).collect(),
            )),
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Content::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Content::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_mapping_list(&self) -> Option<&[Mapping]> {
        match self {
            Content::MappingList(items) => Some(items),
            _ => None,
        }
    }
}

/// Assign a content-type tag to a JSON value.
///
/// JSON has no tabular shape, so the result is never [`ContentType::Table`];
/// tables enter through [`Table`] directly.
pub fn classify(value: &Value) -> Result<ContentType> {
    match value {
        Value::Object(_) => Ok(ContentType::Mapping),
        Value::Array(items) if items.iter().all(Value::is_object) => Ok(ContentType::MappingList),
        other => Err(not_covered(other)),
    }
}

fn not_covered(value: &Value) -> LakeError {
    LakeError::NotCoveredContentType {
        found: describe(value).to_string(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array with non-object elements",
        Value::Object(_) => "object",
    }
}

/// Conversion of caller values into classified [`Content`].
pub trait IntoContent {
    fn into_content(self) -> Result<Content>;
}

impl IntoContent for Content {
    fn into_content(self) -> Result<Content> {
        Ok(self)
    }
}

impl IntoContent for Table {
    fn into_content(self) -> Result<Content> {
        Ok(Content::Table(self))
    }
}

impl IntoContent for Value {
    fn into_content(self) -> Result<Content> {
        Content::from_value(self)
    }
}

impl IntoContent for Mapping {
    fn into_content(self) -> Result<Content> {
        Ok(Content::Mapping(self))
    }
}

impl IntoContent for Vec<Mapping> {
    fn into_content(self) -> Result<Content> {
        Ok(Content::MappingList(self))
    }
}

impl IntoContent for &str {
    fn into_content(self) -> Result<Content> {
        Err(LakeError::NotCoveredContentType {
            found: "string".to_string(),
        })
    }
}

impl IntoContent for String {
    fn into_content(self) -> Result<Content> {
        self.as_str().into_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_mapping() {
        assert_eq!(classify(&json!({"a": 1})).unwrap(), ContentType::Mapping);
    }

    #[test]
    fn test_classify_mapping_list() {
        let value = json!([{"a": 1}, {"a": 2}]);
        assert_eq!(classify(&value).unwrap(), ContentType::MappingList);
    }

    #[test]
    fn test_empty_array_is_mapping_list() {
        assert_eq!(classify(&json!([])).unwrap(), ContentType::MappingList);
        let content = Content::from_value(json!([])).unwrap();
        assert_eq!(content, Content::MappingList(Vec::new()));
    }

    #[test]
    fn test_classify_rejects_scalars_and_mixed_arrays() {
        for value in [json!("text"), json!(1), json!(null), json!([{"a": 1}, 2])] {
            let err = classify(&value).unwrap_err();
            assert!(matches!(err, LakeError::NotCoveredContentType { .. }));
        }
    }

    #[test]
    fn test_string_is_not_content() {
        let err = "hello".into_content().unwrap_err();
        assert_eq!(err.error_code(), "NOT_COVERED_CONTENT_TYPE");
    }

    #[test]
    fn test_content_type_serializes_screaming_case() {
        let encoded = serde_json::to_string(&ContentType::MappingList).unwrap();
        assert_eq!(encoded, "\"MAPPING_LIST\"");
        let decoded: ContentType = serde_json::from_str("\"TABLE\"").unwrap();
        assert_eq!(decoded, ContentType::Table);
    }

    #[test]
    fn test_to_json_round_trips_mapping_list() {
        let value = json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]);
        let content = Content::from_value(value.clone()).unwrap();
        assert_eq!(content.content_type(), ContentType::MappingList);
        assert_eq!(content.to_json(), Some(value));
    }
}
