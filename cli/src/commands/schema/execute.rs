use std::error::Error;

use serde::Serialize;

use db::schema::{Cardinality, ObjectType, RelationshipInfo};

use super::SchemaCmd;
use crate::commands::{Context, Execute};

/// A field of an object type
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// An object type and the collection backing it
#[derive(Debug, Clone, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub collection: String,
    pub fields: Vec<FieldSummary>,
}

impl From<&ObjectType> for TypeSummary {
    fn from(object: &ObjectType) -> Self {
        TypeSummary {
            name: object.name.clone(),
            collection: object.collection.clone(),
            fields: object
                .fields
                .values()
                .map(|field| FieldSummary {
                    name: field.name.clone(),
                    type_name: field.ty.to_string(),
                })
                .collect(),
        }
    }
}

/// A relationship between two collections
#[derive(Debug, Clone, Serialize)]
pub struct EdgeSummary {
    pub source: String,
    pub source_field: String,
    pub target: String,
    pub cardinality: String,
    pub field: String,
    pub foreign_field: String,
}

impl From<&RelationshipInfo> for EdgeSummary {
    fn from(edge: &RelationshipInfo) -> Self {
        EdgeSummary {
            source: edge.source_type.clone(),
            source_field: edge.source_field.clone(),
            target: edge.target_type.clone(),
            cardinality: cardinality_label(edge.cardinality).to_string(),
            field: edge.field.clone(),
            foreign_field: edge.foreign_field.clone(),
        }
    }
}

pub(crate) fn cardinality_label(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::ManyToOne => "many-to-one",
        Cardinality::OneToMany => "one-to-many",
        Cardinality::ManyToMany => "many-to-many",
    }
}

/// Result of the schema command execution
#[derive(Debug, Default, Serialize)]
pub struct SchemaResult {
    pub sdl: String,
    pub types: Vec<TypeSummary>,
    pub relationships: Vec<EdgeSummary>,
    #[serde(skip)]
    pub relationships_only: bool,
}

impl Execute for SchemaCmd {
    type Output = SchemaResult;

    fn execute(self, context: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let graph = context.schema()?;
        Ok(SchemaResult {
            sdl: graph.to_sdl(),
            types: graph.types().map(TypeSummary::from).collect(),
            relationships: graph
                .relationships()
                .edges()
                .iter()
                .map(EdgeSummary::from)
                .collect(),
            relationships_only: self.relationships,
        })
    }
}
