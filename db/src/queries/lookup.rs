use super::QueryError;
use crate::store::RecordStore;
use crate::value::{Record, Value};

/// Position of the first record whose id loosely equals `id`.
pub(crate) fn position(records: &[Record], id: &Value) -> Option<usize> {
    records
        .iter()
        .position(|record| record.get("id").is_some_and(|value| value.loosely_eq(id)))
}

/// Find the first record of `collection` with the given id.
///
/// A missing id is `Ok(None)`; only an unknown collection is an error.
pub fn lookup<'a>(
    store: &'a RecordStore,
    collection: &str,
    id: &Value,
) -> Result<Option<&'a Record>, QueryError> {
    let records = store
        .collection(collection)
        .ok_or_else(|| QueryError::unknown_collection(collection))?;
    Ok(position(records, id).and_then(|index| records.get(index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn store() -> RecordStore {
        RecordStore::from_json_str(
            r#"{"posts": [{"id": 1, "title": "a"}, {"id": "2", "title": "b"}, {"id": 1, "title": "dup"}]}"#,
        )
        .unwrap()
    }

    #[rstest]
    #[case(Value::Int(1), Some("a"))]
    #[case(Value::from("1"), Some("a"))]
    #[case(Value::Int(2), Some("b"))]
    #[case(Value::Float(2.0), Some("b"))]
    #[case(Value::Int(3), None)]
    fn test_lookup(#[case] id: Value, #[case] title: Option<&str>) {
        let store = store();
        let found = lookup(&store, "posts", &id).unwrap();
        assert_eq!(found.and_then(|r| r["title"].as_str()), title);
    }

    #[test]
    fn test_unknown_collection() {
        let store = store();
        let result = lookup(&store, "users", &Value::Int(1));
        assert!(matches!(result, Err(QueryError::UnknownCollection { .. })));
    }
}
