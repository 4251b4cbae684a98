//! Schema inference and query engine for JSON record stores

pub mod config;
pub mod inflect;
pub mod queries;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used items
pub use config::{OverrideConfig, RelationshipOverride};
pub use queries::{Filter, ListParams, QueryError, SortOrder};
pub use resolver::{Arguments, Resolved, Resolvers};
pub use schema::{compose_schema, SchemaError, SchemaGraph};
pub use store::{RecordStore, StoreError};
pub use value::{Record, Value, ValueError};
