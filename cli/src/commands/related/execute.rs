use std::error::Error;

use serde::Serialize;

use db::schema::{FieldSource, RootOperation};
use db::{Arguments, QueryError, Record, Resolved, Resolvers};

use super::RelatedCmd;
use crate::commands::{parse_json_object, root_field, CommandError, Context, Execute};

/// Result of the related command execution
#[derive(Debug, Default, Serialize)]
pub struct RelatedResult {
    pub collection: String,
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub field: String,
    pub target: String,
    pub records: Vec<Record>,
}

impl Execute for RelatedCmd {
    type Output = RelatedResult;

    fn execute(self, context: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let graph = context.schema()?;
        let resolvers = Resolvers::new(&graph);
        let root = root_field(&graph, &self.collection, RootOperation::Lookup)?;

        let mut lookup_args = Arguments::new();
        lookup_args.insert("id".to_string(), self.id.clone().into());
        let parent = match resolvers.resolve_query(&context.store, &root.name, &lookup_args)? {
            Resolved::Record(record) => record,
            _ => {
                return Err(CommandError::RecordNotFound {
                    collection: self.collection,
                    id: self.id,
                }
                .into());
            }
        };

        let type_name = root.ty.name().to_string();
        let field = graph
            .object_type(&type_name)
            .and_then(|object| object.field(&self.field))
            .ok_or_else(|| QueryError::UnknownField {
                type_name: type_name.clone(),
                field: self.field.clone(),
            })?;
        if field.source == FieldSource::Scalar {
            return Err(CommandError::NotARelationship {
                type_name,
                field: self.field,
            }
            .into());
        }

        let mut args = Arguments::new();
        if self.filter.is_some() {
            let filter = parse_json_object("--filter", self.filter.as_deref())?;
            args.insert("filter".to_string(), serde_json::Value::Object(filter));
        }

        let records = match resolvers.resolve_field(&context.store, &type_name, &self.field, &parent, &args)? {
            Resolved::Records(records) => records,
            Resolved::Record(record) => vec![record],
            _ => Vec::new(),
        };

        Ok(RelatedResult {
            collection: self.collection,
            id: self.id,
            type_name,
            target: field.ty.name().to_string(),
            field: self.field,
            records,
        })
    }
}
