//! Relationship override configuration.
//!
//! Some relationships cannot be determined from the structure of the data
//! itself, e.g. a `posts.author_id` field referencing `users`. Overrides name
//! the referenced collection and the fields added on both sides:
//!
//! ```json
//! {
//!     "relationships": {
//!         "posts": {
//!             "author_id": { "ref": "users", "field": "Author", "foreignField": "AuthoredPosts" }
//!         }
//!     }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Override for a single owning field. Every part is optional; missing parts
/// fall back to the naming convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipOverride {
    /// Name of the referenced collection
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Name of the field added to the owning collection's type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Name of the field added to the referenced collection's type
    #[serde(rename = "foreignField", default, skip_serializing_if = "Option::is_none")]
    pub foreign_field: Option<String>,
}

impl RelationshipOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_foreign_field(mut self, foreign_field: impl Into<String>) -> Self {
        self.foreign_field = Some(foreign_field.into());
        self
    }
}

/// Overrides keyed by owning collection, then owning field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideConfig {
    entries: IndexMap<String, IndexMap<String, RelationshipOverride>>,
}

impl OverrideConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the override for `collection.field`.
    pub fn with(
        mut self,
        collection: impl Into<String>,
        field: impl Into<String>,
        entry: RelationshipOverride,
    ) -> Self {
        self.entries
            .entry(collection.into())
            .or_default()
            .insert(field.into(), entry);
        self
    }

    pub fn get(&self, collection: &str, field: &str) -> Option<&RelationshipOverride> {
        self.entries.get(collection)?.get(field)
    }

    /// All overrides as (collection, field, entry), in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &RelationshipOverride)> {
        self.entries.iter().flat_map(|(collection, fields)| {
            fields
                .iter()
                .map(move |(field, entry)| (collection.as_str(), field.as_str(), entry))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(IndexMap::is_empty)
    }
}
