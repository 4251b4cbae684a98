//! Query evaluation against a record store.
//!
//! Every function here takes the store explicitly: reads borrow it shared,
//! mutations borrow it exclusively. Nothing is cached between calls.
//!
//! # Query Categories
//!
//! ## Filtering
//! - [`filter`] - Compile filter arguments into predicates and match records
//!
//! ## Reads
//! - [`lookup`] - Find a record by id
//! - [`list`] - Filtered, sorted, paginated listings and counts
//! - [`relationships`] - Traverse many-to-one, one-to-many and many-to-many edges
//!
//! ## Writes
//! - [`mutation`] - Create, update and remove records

use thiserror::Error;

pub mod filter;
pub mod list;
pub mod lookup;
pub mod mutation;
pub mod relationships;

pub use filter::Filter;
pub use list::{count, list, ListParams, SortOrder, DEFAULT_PER_PAGE};
pub use lookup::lookup;
pub use mutation::{changes_from_json, create, remove, update, Changes};
pub use relationships::{many_to_one, referenced_by, references};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown collection '{collection}'")]
    UnknownCollection { collection: String },

    #[error("Unknown type '{type_name}'")]
    UnknownType { type_name: String },

    #[error("Unknown field '{field}' on type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    #[error("Unknown argument '{argument}' for field '{field}'")]
    UnknownArgument { field: String, argument: String },

    #[error("Unknown filter key '{key}' for collection '{collection}'")]
    UnknownFilterKey { collection: String, key: String },

    #[error("Missing required argument '{argument}' for field '{field}'")]
    MissingArgument { field: String, argument: String },

    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("No record with id '{id}' in collection '{collection}'")]
    NotFound { collection: String, id: String },
}

impl QueryError {
    pub(crate) fn unknown_collection(collection: &str) -> Self {
        QueryError::UnknownCollection {
            collection: collection.to_string(),
        }
    }

    pub(crate) fn invalid(argument: &str, message: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            argument: argument.to_string(),
            message: message.into(),
        }
    }
}
