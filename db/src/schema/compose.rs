//! Schema composition.
//!
//! [`compose_schema`] derives everything from the current store content:
//! field descriptors, relationship edges, filters, object types and root
//! fields. The result depends only on its inputs, and ordered maps keep it
//! deterministic.

use indexmap::IndexMap;

use super::definition::{infer_fields, FieldDescriptor};
use super::filters::synthesize_filters;
use super::graph::{
    Argument, CollectionSchema, FieldSource, ObjectField, ObjectType, RootField, RootOperation,
    SchemaError, SchemaGraph, TypeRef, LIST_METADATA,
};
use super::relations::{Cardinality, RelationshipIndex, RelationshipInfo};
use crate::config::OverrideConfig;
use crate::inflect::{plural_type_name, type_name_from_key};
use crate::store::RecordStore;

/// Names that no collection type may take.
const RESERVED_TYPES: &[&str] = &[
    "Query",
    "Mutation",
    LIST_METADATA,
    "ID",
    "Int",
    "Float",
    "String",
    "Boolean",
];

/// Compose the schema graph of a store.
pub fn compose_schema(
    store: &RecordStore,
    overrides: &OverrideConfig,
) -> Result<SchemaGraph, SchemaError> {
    let collections = collection_schemas(store)?;

    let fields_by_collection: IndexMap<String, IndexMap<String, FieldDescriptor>> = collections
        .iter()
        .map(|(key, schema)| (key.clone(), schema.fields.clone()))
        .collect();
    let relationships = RelationshipIndex::build(&fields_by_collection, overrides)?;

    let mut graph = SchemaGraph {
        collections,
        relationships,
        ..SchemaGraph::default()
    };

    let types = graph
        .collections
        .values()
        .map(|schema| object_type(schema, &graph))
        .collect::<Result<Vec<_>, _>>()?;
    graph.types = types.into_iter().map(|t| (t.name.clone(), t)).collect();

    let mut query = IndexMap::new();
    let mut mutation = IndexMap::new();
    for schema in graph.collections.values() {
        for field in query_fields(schema) {
            insert_unique(&mut query, "Query", field.name.clone(), field)?;
        }
        for field in mutation_fields(schema) {
            insert_unique(&mut mutation, "Mutation", field.name.clone(), field)?;
        }
    }
    graph.query = query;
    graph.mutation = mutation;

    tracing::info!(
        types = graph.types.len(),
        relationships = graph.relationships.len(),
        query_fields = graph.query.len(),
        mutation_fields = graph.mutation.len(),
        "composed schema"
    );
    Ok(graph)
}

/// Naming, fields and filters of every collection, with type-name checks.
fn collection_schemas(
    store: &RecordStore,
) -> Result<IndexMap<String, CollectionSchema>, SchemaError> {
    let mut claimed: IndexMap<String, String> = RESERVED_TYPES
        .iter()
        .map(|name| (name.to_string(), "a built-in type".to_string()))
        .collect();
    let mut collections = IndexMap::new();

    for (key, records) in store.iter() {
        let type_name = type_name_from_key(key);
        let filter_name = format!("{type_name}Filter");

        for name in [&type_name, &filter_name] {
            if let Some(existing) = claimed.get(name) {
                return Err(SchemaError::TypeNameCollision {
                    name: name.clone(),
                    collection: key.to_string(),
                    existing: existing.clone(),
                });
            }
        }
        claimed.insert(type_name.clone(), format!("collection '{key}'"));
        claimed.insert(filter_name.clone(), format!("the filter of collection '{key}'"));

        let fields = infer_fields(records);
        let filter = synthesize_filters(&fields);
        collections.insert(
            key.to_string(),
            CollectionSchema {
                key: key.to_string(),
                plural_name: plural_type_name(&type_name),
                type_name,
                filter_name,
                fields,
                filter,
            },
        );
    }
    Ok(collections)
}

fn object_type(schema: &CollectionSchema, graph: &SchemaGraph) -> Result<ObjectType, SchemaError> {
    let mut fields = IndexMap::new();

    for descriptor in schema.fields.values() {
        let field = ObjectField {
            name: descriptor.name.clone(),
            ty: TypeRef::from_descriptor(descriptor),
            arguments: Vec::new(),
            source: FieldSource::Scalar,
        };
        insert_unique(&mut fields, &schema.type_name, descriptor.name.clone(), field)?;
    }

    for edge in graph.relationships.forward(&schema.key) {
        let field = forward_field(edge, graph);
        insert_unique(&mut fields, &schema.type_name, edge.field.clone(), field)?;
    }

    for edge in graph.relationships.reverse(&schema.key) {
        let field = reverse_field(edge, graph);
        insert_unique(&mut fields, &schema.type_name, edge.foreign_field.clone(), field)?;
    }

    Ok(ObjectType {
        name: schema.type_name.clone(),
        collection: schema.key.clone(),
        fields,
    })
}

fn forward_field(edge: &RelationshipInfo, graph: &SchemaGraph) -> ObjectField {
    let target = TypeRef::named(edge.target_type.clone());
    let (ty, arguments) = match edge.cardinality {
        Cardinality::ManyToOne => (target, Vec::new()),
        _ => (target.list(), filter_argument(graph, &edge.target_collection)),
    };
    ObjectField {
        name: edge.field.clone(),
        ty,
        arguments,
        source: FieldSource::Forward(edge.clone()),
    }
}

fn reverse_field(edge: &RelationshipInfo, graph: &SchemaGraph) -> ObjectField {
    ObjectField {
        name: edge.foreign_field.clone(),
        ty: TypeRef::named(edge.source_type.clone()).list(),
        arguments: filter_argument(graph, &edge.source_collection),
        source: FieldSource::Reverse(edge.clone()),
    }
}

fn filter_argument(graph: &SchemaGraph, collection: &str) -> Vec<Argument> {
    graph
        .collection(collection)
        .map(|schema| vec![Argument::new("filter", TypeRef::named(schema.filter_name.clone()))])
        .unwrap_or_default()
}

fn paging_arguments() -> Vec<Argument> {
    vec![
        Argument::new("page", TypeRef::named("Int")),
        Argument::new("perPage", TypeRef::named("Int")),
    ]
}

fn id_argument() -> Argument {
    Argument::new("id", TypeRef::named("ID").non_null())
}

fn query_fields(schema: &CollectionSchema) -> Vec<RootField> {
    let object = TypeRef::named(schema.type_name.clone());
    let filter = Argument::new("filter", TypeRef::named(schema.filter_name.clone()));

    let mut list_arguments = paging_arguments();
    list_arguments.push(Argument::new("sortField", TypeRef::named("String")));
    list_arguments.push(Argument::new("sortOrder", TypeRef::named("String")));
    list_arguments.push(filter.clone());

    let mut meta_arguments = paging_arguments();
    meta_arguments.push(filter);

    vec![
        root(schema, schema.type_name.clone(), RootOperation::Lookup, object.clone(), vec![id_argument()]),
        root(
            schema,
            format!("all{}", schema.plural_name),
            RootOperation::List,
            object.list(),
            list_arguments,
        ),
        root(
            schema,
            format!("_all{}Meta", schema.plural_name),
            RootOperation::Meta,
            TypeRef::named(LIST_METADATA),
            meta_arguments,
        ),
    ]
}

fn mutation_fields(schema: &CollectionSchema) -> Vec<RootField> {
    let object = TypeRef::named(schema.type_name.clone());
    let data_fields = schema.fields.values().filter(|d| d.name != "id");

    let mut create_arguments = vec![id_argument()];
    create_arguments.extend(
        data_fields
            .clone()
            .map(|d| Argument::new(d.name.clone(), TypeRef::from_descriptor(d))),
    );

    let mut update_arguments = vec![id_argument()];
    update_arguments.extend(data_fields.map(|d| Argument::new(d.name.clone(), TypeRef::from_kind(&d.kind))));

    vec![
        root(
            schema,
            format!("create{}", schema.type_name),
            RootOperation::Create,
            object.clone(),
            create_arguments,
        ),
        root(
            schema,
            format!("update{}", schema.type_name),
            RootOperation::Update,
            object,
            update_arguments,
        ),
        root(
            schema,
            format!("remove{}", schema.type_name),
            RootOperation::Remove,
            TypeRef::named("Boolean"),
            vec![id_argument()],
        ),
    ]
}

fn root(
    schema: &CollectionSchema,
    name: String,
    operation: RootOperation,
    ty: TypeRef,
    arguments: Vec<Argument>,
) -> RootField {
    RootField {
        name,
        ty,
        arguments,
        collection: schema.key.clone(),
        operation,
    }
}

fn insert_unique<T>(
    map: &mut IndexMap<String, T>,
    type_name: &str,
    name: String,
    value: T,
) -> Result<(), SchemaError> {
    if map.contains_key(&name) {
        return Err(SchemaError::FieldCollision {
            type_name: type_name.to_string(),
            field: name,
        });
    }
    map.insert(name, value);
    Ok(())
}
