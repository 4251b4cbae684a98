//! Schema inference for record stores.
//!
//! Composition runs in stages, each in its own module:
//!
//! - [`definition`] infers field descriptors from the records of a collection
//! - [`relations`] detects relationships by naming convention and overrides
//! - [`filters`] synthesizes the filter keys of each collection
//! - [`compose`] assembles object types and root fields into a [`SchemaGraph`]
//! - [`graph`] holds the graph types and renders them as SDL

pub mod compose;
pub mod definition;
pub mod filters;
pub mod graph;
pub mod relations;

pub use compose::compose_schema;
pub use definition::{infer_fields, FieldDescriptor, FieldKind};
pub use filters::{synthesize_filters, FilterDescriptor, Predicate, PredicateKind};
pub use graph::{
    Argument, CollectionSchema, FieldSource, ObjectField, ObjectType, RootField, RootOperation,
    SchemaError, SchemaGraph, TypeRef,
};
pub use relations::{
    classify_field, detect_relationship, Cardinality, Classification, RelationshipIndex,
    RelationshipInfo,
};
