//! Relationship traversal.
//!
//! Every edge is stored once, on the owning side, as an id (`user_id`) or a
//! list of ids (`fan_ids`). Traversal from the owning side reads that field;
//! traversal from the referenced side scans the owning collection for records
//! whose field references the anchor.

use super::filter::Filter;
use super::lookup::lookup;
use super::QueryError;
use crate::schema::relations::RelationshipInfo;
use crate::store::RecordStore;
use crate::value::Record;

/// Many-to-one: the referenced record named by the owning field, if any.
pub fn many_to_one<'a>(
    store: &'a RecordStore,
    edge: &RelationshipInfo,
    parent: &Record,
) -> Result<Option<&'a Record>, QueryError> {
    match parent.get(&edge.source_field) {
        Some(id) => lookup(store, &edge.target_collection, id),
        None => Ok(None),
    }
}

/// Forward many-to-many: referenced records whose id is listed in the owning
/// field, in referenced-collection order.
pub fn references<'a>(
    store: &'a RecordStore,
    edge: &RelationshipInfo,
    parent: &Record,
    filter: &Filter,
) -> Result<Vec<&'a Record>, QueryError> {
    let targets = store
        .collection(&edge.target_collection)
        .ok_or_else(|| QueryError::unknown_collection(&edge.target_collection))?;
    let Some(ids) = parent.get(&edge.source_field) else {
        return Ok(Vec::new());
    };
    Ok(targets
        .iter()
        .filter(|record| record.get("id").is_some_and(|id| ids.contains(id)))
        .filter(|record| filter.matches(record))
        .collect())
}

/// Reverse traversal (one-to-many or many-to-many): owning records whose
/// field equals or contains the anchor's id, in owning-collection order.
pub fn referenced_by<'a>(
    store: &'a RecordStore,
    edge: &RelationshipInfo,
    anchor: &Record,
    filter: &Filter,
) -> Result<Vec<&'a Record>, QueryError> {
    let sources = store
        .collection(&edge.source_collection)
        .ok_or_else(|| QueryError::unknown_collection(&edge.source_collection))?;
    let Some(id) = anchor.get("id") else {
        return Ok(Vec::new());
    };
    Ok(sources
        .iter()
        .filter(|record| {
            record
                .get(&edge.source_field)
                .is_some_and(|reference| reference.contains(id))
        })
        .filter(|record| filter.matches(record))
        .collect())
}
