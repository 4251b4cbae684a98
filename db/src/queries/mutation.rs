//! Record mutations.
//!
//! Mutations write straight into the store. Ids are not checked for
//! uniqueness: a created duplicate is shadowed by the earlier record for
//! lookups, updates and removals.

use indexmap::IndexMap;
use serde_json::Map;

use super::lookup::position;
use super::QueryError;
use crate::store::RecordStore;
use crate::value::{Record, Value};

/// Partial update: `None` removes the field.
pub type Changes = IndexMap<String, Option<Value>>;

/// Convert mutation arguments to changes. `null` becomes a removal.
pub fn changes_from_json(arguments: &Map<String, serde_json::Value>) -> Result<Changes, QueryError> {
    arguments
        .iter()
        .map(|(name, json)| {
            Value::from_json(json)
                .map(|value| (name.clone(), value))
                .map_err(|e| QueryError::invalid(name, e.to_string()))
        })
        .collect()
}

/// Append a record to `collection` and return it.
pub fn create(store: &mut RecordStore, collection: &str, record: Record) -> Result<Record, QueryError> {
    if !record.contains_key("id") {
        return Err(QueryError::MissingArgument {
            field: collection.to_string(),
            argument: "id".to_string(),
        });
    }
    let records = store
        .collection_mut(collection)
        .ok_or_else(|| QueryError::unknown_collection(collection))?;
    tracing::debug!(collection, id = ?record.get("id"), "creating record");
    records.push(record.clone());
    Ok(record)
}

/// Merge `changes` onto the first record with the given id and return it.
///
/// The id itself is never changed.
pub fn update(
    store: &mut RecordStore,
    collection: &str,
    id: &Value,
    changes: Changes,
) -> Result<Record, QueryError> {
    let records = store
        .collection_mut(collection)
        .ok_or_else(|| QueryError::unknown_collection(collection))?;
    let record = position(records, id)
        .and_then(|index| records.get_mut(index))
        .ok_or_else(|| QueryError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;

    for (name, value) in changes {
        if name == "id" {
            continue;
        }
        match value {
            Some(value) => {
                record.insert(name, value);
            }
            None => {
                record.shift_remove(&name);
            }
        }
    }
    tracing::debug!(collection, %id, "updated record");
    Ok(record.clone())
}

/// Delete the first record with the given id. Returns whether one was found.
pub fn remove(store: &mut RecordStore, collection: &str, id: &Value) -> Result<bool, QueryError> {
    let records = store
        .collection_mut(collection)
        .ok_or_else(|| QueryError::unknown_collection(collection))?;
    let Some(index) = position(records, id) else {
        return Ok(false);
    };
    records.remove(index);
    tracing::debug!(collection, %id, "removed record");
    Ok(true)
}
