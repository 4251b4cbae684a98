//! Composed schema graph and its SDL rendering.
//!
//! A [`SchemaGraph`] is the complete description handed to a query executor:
//! one object type and one filter input per collection, the shared
//! `ListMetadata` type, and the `Query`/`Mutation` root fields. Every field
//! records where its value comes from ([`FieldSource`], [`RootOperation`]) so
//! that resolvers can be generated from the graph alone.

use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use super::definition::{FieldDescriptor, FieldKind};
use super::filters::FilterDescriptor;
use super::relations::{RelationshipIndex, RelationshipInfo};

/// Name of the object type returned by `_all<Plural>Meta` fields.
pub const LIST_METADATA: &str = "ListMetadata";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Override configured for unknown collection '{collection}'")]
    UnknownOverrideCollection { collection: String },

    #[error("Override configured for unknown field '{field}' of collection '{collection}'")]
    UnknownOverrideField { collection: String, field: String },

    #[error("Override for '{collection}.{field}' references missing collection '{target}'")]
    UnknownRelationshipTarget {
        collection: String,
        field: String,
        target: String,
    },

    #[error("Type name '{name}' of collection '{collection}' collides with {existing}")]
    TypeNameCollision {
        name: String,
        collection: String,
        existing: String,
    },

    #[error("Field '{field}' is defined twice on type '{type_name}'")]
    FieldCollision { type_name: String, field: String },
}

/// Reference to a type, with list and non-null wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeRef {
    Named(String),
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    /// Nullable reference for a field kind.
    pub fn from_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::List(inner) => TypeRef::from_kind(inner).list(),
            scalar => TypeRef::named(scalar.graphql_type()),
        }
    }

    /// Reference for a field descriptor, non-null unless the field is nullable.
    pub fn from_descriptor(descriptor: &FieldDescriptor) -> Self {
        let ty = TypeRef::from_kind(&descriptor.kind);
        if descriptor.nullable { ty } else { ty.non_null() }
    }

    /// Innermost named type.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::NonNull(inner) | TypeRef::List(inner) => inner.name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

/// Argument of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    pub ty: TypeRef,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Where an object field takes its value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldSource {
    /// Stored value of the record field with the same name
    Scalar,
    /// Forward edge owned by this type
    Forward(RelationshipInfo),
    /// Reverse edge of a forward edge owned by another type
    Reverse(RelationshipInfo),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectField {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<Argument>,
    pub source: FieldSource,
}

/// Object type of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectType {
    pub name: String,
    pub collection: String,
    pub fields: IndexMap<String, ObjectField>,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&ObjectField> {
        self.fields.get(name)
    }
}

/// Operation performed by a root field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RootOperation {
    Lookup,
    List,
    Meta,
    Create,
    Update,
    Remove,
}

impl RootOperation {
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            RootOperation::Create | RootOperation::Update | RootOperation::Remove
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootField {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<Argument>,
    pub collection: String,
    pub operation: RootOperation,
}

impl RootField {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// Naming and derived descriptors of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSchema {
    /// Collection key in the store (e.g., "posts")
    pub key: String,

    /// Object type name (e.g., "Post")
    pub type_name: String,

    /// Plural type name used by list fields (e.g., "Posts")
    pub plural_name: String,

    /// Filter input type name (e.g., "PostFilter")
    pub filter_name: String,

    pub fields: IndexMap<String, FieldDescriptor>,

    pub filter: FilterDescriptor,
}

/// Complete schema of a record store.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    pub(crate) collections: IndexMap<String, CollectionSchema>,
    pub(crate) types: IndexMap<String, ObjectType>,
    pub(crate) query: IndexMap<String, RootField>,
    pub(crate) mutation: IndexMap<String, RootField>,
    pub(crate) relationships: RelationshipIndex,
}

impl SchemaGraph {
    /// Collections in store order.
    pub fn collections(&self) -> impl Iterator<Item = &CollectionSchema> {
        self.collections.values()
    }

    pub fn collection(&self, key: &str) -> Option<&CollectionSchema> {
        self.collections.get(key)
    }

    /// Object types in store order.
    pub fn types(&self) -> impl Iterator<Item = &ObjectType> {
        self.types.values()
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name)
    }

    /// Object type of a collection.
    pub fn type_of(&self, collection: &str) -> Option<&ObjectType> {
        let schema = self.collections.get(collection)?;
        self.types.get(&schema.type_name)
    }

    pub fn query_fields(&self) -> impl Iterator<Item = &RootField> {
        self.query.values()
    }

    pub fn query_field(&self, name: &str) -> Option<&RootField> {
        self.query.get(name)
    }

    pub fn mutation_fields(&self) -> impl Iterator<Item = &RootField> {
        self.mutation.values()
    }

    pub fn mutation_field(&self, name: &str) -> Option<&RootField> {
        self.mutation.get(name)
    }

    /// Root field performing `operation` on `collection`.
    pub fn root_field(&self, collection: &str, operation: RootOperation) -> Option<&RootField> {
        let fields = if operation.is_mutation() {
            &self.mutation
        } else {
            &self.query
        };
        fields
            .values()
            .find(|field| field.collection == collection && field.operation == operation)
    }

    pub fn relationships(&self) -> &RelationshipIndex {
        &self.relationships
    }

    /// Render the graph as GraphQL SDL.
    pub fn to_sdl(&self) -> String {
        let mut blocks = Vec::new();

        for object in self.types.values() {
            let body = object
                .fields
                .values()
                .map(|field| render_field(&field.name, &field.arguments, &field.ty))
                .collect::<Vec<_>>();
            blocks.push(render_block("type", &object.name, &body));
        }

        for schema in self.collections.values() {
            let body = schema
                .filter
                .iter()
                .map(|(key, predicate)| format!("{key}: {}", TypeRef::from_kind(&predicate.input)))
                .collect::<Vec<_>>();
            blocks.push(render_block("input", &schema.filter_name, &body));
        }

        if !self.collections.is_empty() {
            blocks.push(render_block("type", LIST_METADATA, &["count: Int".to_string()]));
        }

        for (name, fields) in [("Query", &self.query), ("Mutation", &self.mutation)] {
            if fields.is_empty() {
                continue;
            }
            let body = fields
                .values()
                .map(|field| render_field(&field.name, &field.arguments, &field.ty))
                .collect::<Vec<_>>();
            blocks.push(render_block("type", name, &body));
        }

        blocks.join("\n")
    }
}

fn render_field(name: &str, arguments: &[Argument], ty: &TypeRef) -> String {
    if arguments.is_empty() {
        return format!("{name}: {ty}");
    }
    let args = arguments
        .iter()
        .map(|a| format!("{}: {}", a.name, a.ty))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{name}({args}): {ty}")
}

fn render_block(keyword: &str, name: &str, lines: &[String]) -> String {
    let mut out = format!("{keyword} {name} {{\n");
    for line in lines {
        let _ = writeln!(out, "  {line}");
    }
    out.push_str("}\n");
    out
}
