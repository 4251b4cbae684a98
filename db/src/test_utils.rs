//! Shared test utilities for engine, integration and command tests.
//!
//! This module provides common helpers for building stores and schemas from
//! fixture data.

#[cfg(feature = "test-utils")]
use std::io::Write;

#[cfg(feature = "test-utils")]
use tempfile::NamedTempFile;

use crate::config::OverrideConfig;
use crate::fixtures;
use crate::schema::{compose_schema, SchemaGraph};
use crate::store::RecordStore;

/// Create a temporary file containing the given content.
///
/// Used to create data and config files for loading tests.
#[cfg(feature = "test-utils")]
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Load a store from JSON content.
pub fn load_store(json: &str) -> RecordStore {
    RecordStore::from_json_str(json).expect("Fixture should load")
}

/// Parse override configuration from JSON content.
pub fn load_overrides(json: &str) -> OverrideConfig {
    serde_json::from_str(json).expect("Overrides should parse")
}

/// Store with the convention-linked blog data.
///
/// Use for: lookup, list, count, one-to-many and many-to-one traversal
pub fn blog_store() -> RecordStore {
    load_store(fixtures::BLOG)
}

/// Store with the authored blog data and its overrides.
///
/// Use for: override naming, many-to-many traversal
pub fn authored_store() -> (RecordStore, OverrideConfig) {
    (load_store(fixtures::AUTHORED), load_overrides(fixtures::OVERRIDES))
}

/// Compose a schema, panicking on configuration errors.
pub fn schema_for(store: &RecordStore, overrides: &OverrideConfig) -> SchemaGraph {
    compose_schema(store, overrides).expect("Schema should compose")
}
