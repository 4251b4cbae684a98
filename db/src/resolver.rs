//! Resolver dispatch for a composed schema.
//!
//! [`Resolvers`] answer the invocations a query executor makes while walking
//! a request: root query fields, root mutation fields and fields of object
//! types (with the parent record). The store is passed into every call.
//!
//! ```text
//! resolve_query(&store, "allPosts", {"filter": {"q": "lorem"}})
//!     -> Records([...])
//! resolve_field(&store, "Post", "User", &post, {})
//!     -> Record({...})
//! resolve_mutation(&mut store, "removePost", {"id": 1})
//!     -> Boolean(true)
//! ```

use serde::Serialize;
use serde_json::Map;

use crate::queries::{
    self, changes_from_json, Filter, ListParams, QueryError, SortOrder,
};
use crate::schema::graph::{
    CollectionSchema, FieldSource, RootField, RootOperation, SchemaGraph,
};
use crate::schema::relations::Cardinality;
use crate::store::RecordStore;
use crate::value::{Record, Value};

/// Arguments of one field invocation.
pub type Arguments = Map<String, serde_json::Value>;

/// Result of a resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    Null,
    Value(Value),
    Record(Record),
    Records(Vec<Record>),
    Boolean(bool),
    Meta { count: usize },
}

impl Resolved {
    fn from_record(record: Option<&Record>) -> Self {
        record.map_or(Resolved::Null, |r| Resolved::Record(r.clone()))
    }

    fn from_records(records: Vec<&Record>) -> Self {
        Resolved::Records(records.into_iter().cloned().collect())
    }

    /// JSON form, as an executor would place it in a response.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Resolved::Null => serde_json::Value::Null,
            Resolved::Value(value) => value.to_json(),
            Resolved::Record(record) => crate::value::record_to_json(record),
            Resolved::Records(records) => {
                serde_json::Value::Array(records.iter().map(crate::value::record_to_json).collect())
            }
            Resolved::Boolean(b) => serde_json::Value::Bool(*b),
            Resolved::Meta { count } => serde_json::json!({ "count": count }),
        }
    }
}

/// Resolvers generated from one [`SchemaGraph`].
#[derive(Debug, Clone, Copy)]
pub struct Resolvers<'g> {
    graph: &'g SchemaGraph,
}

impl<'g> Resolvers<'g> {
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g SchemaGraph {
        self.graph
    }

    /// Invoke a root query field by name.
    pub fn resolve_query(
        &self,
        store: &RecordStore,
        field: &str,
        args: &Arguments,
    ) -> Result<Resolved, QueryError> {
        let root = self
            .graph
            .query_field(field)
            .ok_or_else(|| unknown_root("Query", field))?;
        let schema = self.collection(&root.collection)?;
        check_arguments(root, args)?;

        match root.operation {
            RootOperation::Lookup => {
                let id = id_argument(args)?;
                Ok(Resolved::from_record(queries::lookup(store, &schema.key, &id)?))
            }
            RootOperation::List => {
                let params = list_params(schema, args)?;
                let filter = Filter::from_argument(&schema.key, &schema.filter, args.get("filter"))?;
                Ok(Resolved::from_records(queries::list(store, &schema.key, &params, &filter)?))
            }
            RootOperation::Meta => {
                let params = list_params(schema, args)?;
                let filter = Filter::from_argument(&schema.key, &schema.filter, args.get("filter"))?;
                let count = queries::count(store, &schema.key, &params, &filter)?;
                Ok(Resolved::Meta { count })
            }
            RootOperation::Create | RootOperation::Update | RootOperation::Remove => {
                Err(unknown_root("Query", field))
            }
        }
    }

    /// Invoke a root mutation field by name.
    pub fn resolve_mutation(
        &self,
        store: &mut RecordStore,
        field: &str,
        args: &Arguments,
    ) -> Result<Resolved, QueryError> {
        let root = self
            .graph
            .mutation_field(field)
            .ok_or_else(|| unknown_root("Mutation", field))?;
        let schema = self.collection(&root.collection)?;
        check_arguments(root, args)?;

        match root.operation {
            RootOperation::Create => {
                let record: Record = changes_from_json(args)?
                    .into_iter()
                    .filter_map(|(name, value)| value.map(|v| (name, v)))
                    .collect();
                let created = queries::create(store, &schema.key, record)?;
                Ok(Resolved::Record(created))
            }
            RootOperation::Update => {
                let id = id_argument(args)?;
                let changes = changes_from_json(args)?;
                let updated = queries::update(store, &schema.key, &id, changes)?;
                Ok(Resolved::Record(updated))
            }
            RootOperation::Remove => {
                let id = id_argument(args)?;
                Ok(Resolved::Boolean(queries::remove(store, &schema.key, &id)?))
            }
            RootOperation::Lookup | RootOperation::List | RootOperation::Meta => {
                Err(unknown_root("Mutation", field))
            }
        }
    }

    /// Invoke a field of an object type on its parent record.
    pub fn resolve_field(
        &self,
        store: &RecordStore,
        type_name: &str,
        field: &str,
        parent: &Record,
        args: &Arguments,
    ) -> Result<Resolved, QueryError> {
        let object = self
            .graph
            .object_type(type_name)
            .ok_or_else(|| QueryError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        let object_field = object.field(field).ok_or_else(|| QueryError::UnknownField {
            type_name: type_name.to_string(),
            field: field.to_string(),
        })?;
        if let Some(argument) = args
            .keys()
            .find(|name| !object_field.arguments.iter().any(|a| &a.name == *name))
        {
            return Err(QueryError::UnknownArgument {
                field: field.to_string(),
                argument: argument.clone(),
            });
        }

        match &object_field.source {
            FieldSource::Scalar => Ok(parent
                .get(field)
                .map_or(Resolved::Null, |value| Resolved::Value(value.clone()))),
            FieldSource::Forward(edge) if edge.cardinality == Cardinality::ManyToOne => {
                Ok(Resolved::from_record(queries::many_to_one(store, edge, parent)?))
            }
            FieldSource::Forward(edge) => {
                let filter = self.filter_for(&edge.target_collection, args)?;
                Ok(Resolved::from_records(queries::references(store, edge, parent, &filter)?))
            }
            FieldSource::Reverse(edge) => {
                let filter = self.filter_for(&edge.source_collection, args)?;
                Ok(Resolved::from_records(queries::referenced_by(store, edge, parent, &filter)?))
            }
        }
    }

    fn collection(&self, key: &str) -> Result<&'g CollectionSchema, QueryError> {
        self.graph
            .collection(key)
            .ok_or_else(|| QueryError::unknown_collection(key))
    }

    fn filter_for(&self, collection: &str, args: &Arguments) -> Result<Filter, QueryError> {
        let schema = self.collection(collection)?;
        Filter::from_argument(&schema.key, &schema.filter, args.get("filter"))
    }
}

fn unknown_root(type_name: &str, field: &str) -> QueryError {
    QueryError::UnknownField {
        type_name: type_name.to_string(),
        field: field.to_string(),
    }
}

/// Unknown arguments and missing non-null arguments are errors.
fn check_arguments(root: &RootField, args: &Arguments) -> Result<(), QueryError> {
    if let Some(name) = args.keys().find(|name| root.argument(name).is_none()) {
        return Err(QueryError::UnknownArgument {
            field: root.name.clone(),
            argument: name.clone(),
        });
    }
    for argument in root.arguments.iter().filter(|a| a.ty.is_non_null()) {
        if args.get(&argument.name).is_none_or(serde_json::Value::is_null) {
            return Err(QueryError::MissingArgument {
                field: root.name.clone(),
                argument: argument.name.clone(),
            });
        }
    }
    Ok(())
}

fn id_argument(args: &Arguments) -> Result<Value, QueryError> {
    let json = args.get("id").unwrap_or(&serde_json::Value::Null);
    match Value::from_json(json) {
        Ok(Some(Value::List(_))) => Err(QueryError::invalid("id", "expected a single id")),
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(QueryError::invalid("id", "id must not be null")),
        Err(e) => Err(QueryError::invalid("id", e.to_string())),
    }
}

fn integer_argument(args: &Arguments, name: &str) -> Result<Option<i64>, QueryError> {
    match args.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(json) => json
            .as_i64()
            .map(Some)
            .ok_or_else(|| QueryError::invalid(name, format!("expected an integer, got {json}"))),
    }
}

fn string_argument<'a>(args: &'a Arguments, name: &str) -> Result<Option<&'a str>, QueryError> {
    match args.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(json) => json
            .as_str()
            .map(Some)
            .ok_or_else(|| QueryError::invalid(name, format!("expected a string, got {json}"))),
    }
}

fn list_params(schema: &CollectionSchema, args: &Arguments) -> Result<ListParams, QueryError> {
    let sort_field = string_argument(args, "sortField")?;
    if let Some(field) = sort_field {
        if !schema.fields.contains_key(field) {
            return Err(QueryError::UnknownField {
                type_name: schema.type_name.clone(),
                field: field.to_string(),
            });
        }
    }
    Ok(ListParams {
        page: integer_argument(args, "page")?,
        per_page: integer_argument(args, "perPage")?,
        sort_field: sort_field.map(str::to_string),
        sort_order: string_argument(args, "sortOrder")?
            .map(SortOrder::parse)
            .unwrap_or_default(),
    })
}
