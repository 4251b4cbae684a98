//! Relationship detection between collections.
//!
//! A field named `X_id` references one record of collection `Xs`
//! (many-to-one); a field named `X_ids` references several (many-to-many).
//! Override configuration can replace the referenced collection and the names
//! of the fields exposed on both sides.
//!
//! Resolution is two-stage: convention defaults are computed first, then the
//! override for the field (if any) replaces parts of them. Every forward edge
//! implies exactly one reverse edge on the referenced collection; the
//! [`RelationshipIndex`] is built once per schema so reverse edges are found
//! without rescanning every collection.

use indexmap::IndexMap;
use serde::Serialize;

use super::definition::FieldDescriptor;
use super::graph::SchemaError;
use crate::config::{OverrideConfig, RelationshipOverride};
use crate::inflect::{plural_type_name, pluralize, type_name_from_key};

/// Cardinality of a relationship, seen from the side exposing the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinality {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl Cardinality {
    /// Cardinality of the matching edge on the other side.
    pub fn reverse(self) -> Cardinality {
        match self {
            Cardinality::ManyToOne => Cardinality::OneToMany,
            Cardinality::OneToMany => Cardinality::ManyToOne,
            Cardinality::ManyToMany => Cardinality::ManyToMany,
        }
    }
}

/// Naming-convention classification of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a relationship field
    None,
    /// `X_id`: references one record of the named collection
    ManyToOne(String),
    /// `X_ids`: references several records of the named collection
    ManyToMany(String),
}

/// Classify a field by its name alone.
///
/// The referenced collection is the plural of the field stem:
/// `user_id` -> `users`, `category_ids` -> `categories`.
pub fn classify_field(field_name: &str) -> Classification {
    if let Some(stem) = field_name.strip_suffix("_ids").filter(|s| !s.is_empty()) {
        Classification::ManyToMany(pluralize(stem))
    } else if let Some(stem) = field_name.strip_suffix("_id").filter(|s| !s.is_empty()) {
        Classification::ManyToOne(pluralize(stem))
    } else {
        Classification::None
    }
}

/// Fully resolved forward relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipInfo {
    /// Owning collection key (e.g., "posts")
    pub source_collection: String,

    /// Owning field holding the reference (e.g., "user_id")
    pub source_field: String,

    /// Owning type name (e.g., "Post")
    pub source_type: String,

    /// Referenced collection key (e.g., "users")
    pub target_collection: String,

    /// Referenced type name (e.g., "User")
    pub target_type: String,

    /// Forward cardinality: `ManyToOne` or `ManyToMany`
    pub cardinality: Cardinality,

    /// Field exposed on the owning type (e.g., "User")
    pub field: String,

    /// Field exposed on the referenced type (e.g., "Posts")
    pub foreign_field: String,
}

impl RelationshipInfo {
    /// Cardinality of the reverse field on the referenced type.
    pub fn reverse_cardinality(&self) -> Cardinality {
        self.cardinality.reverse()
    }
}

/// Resolve naming and target for `collection.field`.
///
/// Convention first, then the override (if any) replaces the target, the
/// exposed field name and the reverse field name independently.
pub fn detect_relationship(
    collection: &str,
    field: &str,
    overrides: &OverrideConfig,
    many_to_many: bool,
) -> RelationshipInfo {
    let convention_target = match classify_field(field) {
        Classification::ManyToOne(target) | Classification::ManyToMany(target) => target,
        Classification::None => pluralize(field),
    };
    let entry = overrides.get(collection, field);
    let target_collection = entry
        .and_then(|o| o.target.clone())
        .unwrap_or(convention_target);

    let source_type = type_name_from_key(collection);
    let target_type = type_name_from_key(&target_collection);
    let default_field = if many_to_many {
        plural_type_name(&target_type)
    } else {
        target_type.clone()
    };

    RelationshipInfo {
        source_collection: collection.to_string(),
        source_field: field.to_string(),
        field: entry
            .and_then(|o| o.field.clone())
            .unwrap_or(default_field),
        foreign_field: entry
            .and_then(|o| o.foreign_field.clone())
            .unwrap_or_else(|| plural_type_name(&source_type)),
        source_type,
        target_collection,
        target_type,
        cardinality: if many_to_many {
            Cardinality::ManyToMany
        } else {
            Cardinality::ManyToOne
        },
    }
}

/// Cardinality of an overridden field: by suffix when it has one, otherwise
/// by whether its values are lists.
fn override_is_many(descriptor: &FieldDescriptor) -> bool {
    match classify_field(&descriptor.name) {
        Classification::ManyToMany(_) => true,
        Classification::ManyToOne(_) => false,
        Classification::None => descriptor.kind.is_list(),
    }
}

/// Every forward relationship of a store, indexed by owning and by referenced
/// collection.
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    edges: Vec<RelationshipInfo>,
    by_source: IndexMap<String, Vec<usize>>,
    by_target: IndexMap<String, Vec<usize>>,
}

impl RelationshipIndex {
    /// Build the index from the inferred fields of every collection.
    ///
    /// Overridden fields must exist and reference an existing collection.
    /// Convention fields referencing a missing collection are plain fields.
    pub fn build(
        collections: &IndexMap<String, IndexMap<String, FieldDescriptor>>,
        overrides: &OverrideConfig,
    ) -> Result<Self, SchemaError> {
        validate_overrides(collections, overrides)?;

        let mut index = RelationshipIndex::default();
        for (collection, fields) in collections {
            for descriptor in fields.values() {
                if let Some(info) = resolve_field(collection, descriptor, collections, overrides)? {
                    index.push(info);
                }
            }
        }
        Ok(index)
    }

    fn push(&mut self, info: RelationshipInfo) {
        let position = self.edges.len();
        self.by_source
            .entry(info.source_collection.clone())
            .or_default()
            .push(position);
        self.by_target
            .entry(info.target_collection.clone())
            .or_default()
            .push(position);
        self.edges.push(info);
    }

    /// Forward edges owned by `collection`, in field order.
    pub fn forward<'a>(&'a self, collection: &str) -> impl Iterator<Item = &'a RelationshipInfo> + use<'a> {
        Self::select(&self.edges, self.by_source.get(collection))
    }

    /// Forward edges referencing `collection`; each yields a reverse field on it.
    pub fn reverse<'a>(&'a self, collection: &str) -> impl Iterator<Item = &'a RelationshipInfo> + use<'a> {
        Self::select(&self.edges, self.by_target.get(collection))
    }

    fn select<'a>(
        edges: &'a [RelationshipInfo],
        positions: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a RelationshipInfo> + 'a {
        positions
            .into_iter()
            .flatten()
            .filter_map(move |&position| edges.get(position))
    }

    /// All forward edges, in discovery order.
    pub fn edges(&self) -> &[RelationshipInfo] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

fn validate_overrides(
    collections: &IndexMap<String, IndexMap<String, FieldDescriptor>>,
    overrides: &OverrideConfig,
) -> Result<(), SchemaError> {
    for (collection, field, _) in overrides.iter() {
        let fields = collections
            .get(collection)
            .ok_or_else(|| SchemaError::UnknownOverrideCollection {
                collection: collection.to_string(),
            })?;
        if !fields.contains_key(field) {
            return Err(SchemaError::UnknownOverrideField {
                collection: collection.to_string(),
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

fn resolve_field(
    collection: &str,
    descriptor: &FieldDescriptor,
    collections: &IndexMap<String, IndexMap<String, FieldDescriptor>>,
    overrides: &OverrideConfig,
) -> Result<Option<RelationshipInfo>, SchemaError> {
    let field = descriptor.name.as_str();

    if let Some(entry) = overrides.get(collection, field) {
        let info = detect_relationship(collection, field, overrides, override_is_many(descriptor));
        if !collections.contains_key(&info.target_collection) {
            return Err(SchemaError::UnknownRelationshipTarget {
                collection: collection.to_string(),
                field: field.to_string(),
                target: info.target_collection,
            });
        }
        log_override(collection, field, entry, &info);
        return Ok(Some(info));
    }

    let (target, many) = match classify_field(field) {
        Classification::None => return Ok(None),
        Classification::ManyToOne(target) => (target, false),
        Classification::ManyToMany(target) => (target, true),
    };
    if !collections.contains_key(&target) {
        tracing::warn!(collection, field, target = %target, "no such collection, keeping plain field");
        return Ok(None);
    }

    let info = detect_relationship(collection, field, overrides, many);
    tracing::debug!(
        collection,
        field,
        target = %info.target_collection,
        cardinality = ?info.cardinality,
        "detected relationship"
    );
    Ok(Some(info))
}

fn log_override(collection: &str, field: &str, entry: &RelationshipOverride, info: &RelationshipInfo) {
    tracing::debug!(
        collection,
        field,
        target = %info.target_collection,
        exposed = %info.field,
        reverse = %info.foreign_field,
        ref_overridden = entry.target.is_some(),
        "applied relationship override"
    );
}
