//! In-memory record store.
//!
//! The store maps collection names to ordered record sequences. It is the
//! single source of truth: queries read from it, mutations write to it, and
//! every schema is derived from its current content.
//!
//! Loading accepts a JSON object whose values are arrays of flat objects:
//!
//! ```json
//! {
//!     "posts": [{ "id": 1, "title": "Lorem Ipsum", "user_id": 123 }],
//!     "users": [{ "id": 123, "name": "John Doe" }]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;

use crate::value::{record_from_json, Record, ValueError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read data file '{path}': {message}")]
    FileReadFailed { path: String, message: String },

    #[error("Failed to parse data JSON: {message}")]
    JsonParseFailed { message: String },

    #[error("Data must be a JSON object mapping collection names to arrays")]
    NotAnObject,

    #[error("Collection '{collection}' must be an array of records")]
    NotAnArray { collection: String },

    #[error("Record #{index} in '{collection}' is not a JSON object")]
    NotARecord { collection: String, index: usize },

    #[error("Record #{index} in '{collection}' has no 'id' field")]
    MissingId { collection: String, index: usize },

    #[error("Field '{field}' of record #{index} in '{collection}': {source}")]
    InvalidValue {
        collection: String,
        index: usize,
        field: String,
        source: ValueError,
    },
}

/// Ordered collections of flat records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    collections: IndexMap<String, Vec<Record>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::FileReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// Load a store from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, StoreError> {
        let json: serde_json::Value =
            serde_json::from_str(content).map_err(|e| StoreError::JsonParseFailed {
                message: e.to_string(),
            })?;
        Self::from_json(&json)
    }

    /// Load a store from an already parsed JSON value.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, StoreError> {
        let object = json.as_object().ok_or(StoreError::NotAnObject)?;
        let mut store = RecordStore::new();

        for (name, records) in object {
            let items = records.as_array().ok_or_else(|| StoreError::NotAnArray {
                collection: name.clone(),
            })?;

            let mut collection = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let fields = item.as_object().ok_or_else(|| StoreError::NotARecord {
                    collection: name.clone(),
                    index,
                })?;
                let record = record_from_json(fields).map_err(|(field, source)| {
                    StoreError::InvalidValue {
                        collection: name.clone(),
                        index,
                        field,
                        source,
                    }
                })?;
                if !record.contains_key("id") {
                    return Err(StoreError::MissingId {
                        collection: name.clone(),
                        index,
                    });
                }
                collection.push(record);
            }

            warn_duplicate_ids(name, &collection);
            store.insert_collection(name.clone(), collection);
        }

        tracing::debug!(collections = store.len(), "loaded record store");
        Ok(store)
    }

    /// Add or replace a whole collection.
    pub fn insert_collection(&mut self, name: impl Into<String>, records: Vec<Record>) {
        self.collections.insert(name.into(), records);
    }

    pub fn collection(&self, name: &str) -> Option<&[Record]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Vec<Record>> {
        self.collections.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Collection names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Collections with their records, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.collections
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Serialize the store back to JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.collections
                .iter()
                .map(|(name, records)| {
                    let items = records.iter().map(crate::value::record_to_json).collect();
                    (name.clone(), serde_json::Value::Array(items))
                })
                .collect(),
        )
    }
}

fn warn_duplicate_ids(collection: &str, records: &[Record]) {
    let mut seen = HashSet::new();
    for key in records.iter().filter_map(|r| r.get("id").and_then(|id| id.id_key())) {
        if !seen.insert(key.clone()) {
            tracing::warn!(collection, id = %key, "duplicate id, lookups will return the first match");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_json_str_preserves_order() {
        let store = RecordStore::from_json_str(
            r#"{"users": [{"id": 2}, {"id": 1}], "posts": [{"id": 10, "title": "x"}]}"#,
        )
        .unwrap();

        let names: Vec<_> = store.names().collect();
        assert_eq!(names, vec!["users", "posts"]);

        let users = store.collection("users").unwrap();
        assert_eq!(users[0]["id"], Value::Int(2));
        assert_eq!(users[1]["id"], Value::Int(1));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"posts": [{"id": 1}]}"#).unwrap();

        let store = RecordStore::from_path(file.path()).unwrap();
        assert_eq!(store.collection("posts").map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = RecordStore::from_path(Path::new("/nonexistent/db.json"));
        assert!(matches!(result, Err(StoreError::FileReadFailed { .. })));
    }

    #[rstest]
    #[case("[1, 2]", "NotAnObject")]
    #[case(r#"{"posts": 1}"#, "NotAnArray")]
    #[case(r#"{"posts": [1]}"#, "NotARecord")]
    #[case(r#"{"posts": [{"title": "x"}]}"#, "MissingId")]
    #[case(r#"{"posts": [{"id": 1, "meta": {"a": 1}}]}"#, "InvalidValue")]
    #[case("{not json", "JsonParseFailed")]
    fn test_from_json_str_rejects_malformed(#[case] input: &str, #[case] variant: &str) {
        let err = RecordStore::from_json_str(input).unwrap_err();
        assert!(format!("{:?}", err).starts_with(variant), "got {:?}", err);
    }

    #[test]
    fn test_duplicate_ids_are_accepted() {
        let store = RecordStore::from_json_str(r#"{"posts": [{"id": 1}, {"id": 1}]}"#).unwrap();
        assert_eq!(store.collection("posts").unwrap().len(), 2);
    }

    #[test]
    fn test_to_json_round_trips_content() {
        let input = serde_json::json!({"posts": [{"id": 1, "tags": ["a", "b"]}]});
        let store = RecordStore::from_json(&input).unwrap();
        assert_eq!(store.to_json(), input);
    }
}
