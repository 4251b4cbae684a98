//! Compiled filters.
//!
//! A filter argument is a JSON object of filter keys to values. Compiling it
//! against a collection's [`FilterDescriptor`] resolves each key to its
//! predicate once, so matching a record is a plain conjunction.

use serde_json::Map;

use super::QueryError;
use crate::schema::filters::{FilterDescriptor, Predicate};
use crate::value::{Record, Value};

/// Conjunction of predicates with their arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(Predicate, Value)>,
}

impl Filter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Compile filter arguments for `collection`.
    ///
    /// Keys with a `null` value are ignored. Unknown keys are an error.
    pub fn compile(
        collection: &str,
        descriptor: &FilterDescriptor,
        arguments: &Map<String, serde_json::Value>,
    ) -> Result<Self, QueryError> {
        let mut clauses = Vec::with_capacity(arguments.len());
        for (key, json) in arguments {
            let predicate = descriptor
                .get(key)
                .ok_or_else(|| QueryError::UnknownFilterKey {
                    collection: collection.to_string(),
                    key: key.clone(),
                })?;
            let value = Value::from_json(json).map_err(|e| QueryError::invalid(key, e.to_string()))?;
            if let Some(value) = value {
                clauses.push((predicate.clone(), value));
            }
        }
        Ok(Filter { clauses })
    }

    /// Compile an optional `filter` argument. Absent and `null` match everything.
    pub fn from_argument(
        collection: &str,
        descriptor: &FilterDescriptor,
        argument: Option<&serde_json::Value>,
    ) -> Result<Self, QueryError> {
        match argument {
            None | Some(serde_json::Value::Null) => Ok(Filter::all()),
            Some(serde_json::Value::Object(arguments)) => Self::compile(collection, descriptor, arguments),
            Some(other) => Err(QueryError::invalid(
                "filter",
                format!("expected an object, got {other}"),
            )),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.clauses
            .iter()
            .all(|(predicate, value)| predicate.matches(record, value))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}
