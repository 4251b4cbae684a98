use std::error::Error;

use serde::Serialize;

use db::schema::RootOperation;
use db::{Arguments, Record, Resolved, Resolvers};

use super::GetCmd;
use crate::commands::{root_field, Context, Execute};

/// Result of the get command execution
#[derive(Debug, Default, Serialize)]
pub struct GetResult {
    pub collection: String,
    pub id: String,
    pub record: Option<Record>,
}

impl Execute for GetCmd {
    type Output = GetResult;

    fn execute(self, context: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let graph = context.schema()?;
        let root = root_field(&graph, &self.collection, RootOperation::Lookup)?;

        let mut args = Arguments::new();
        args.insert("id".to_string(), self.id.clone().into());

        let record = match Resolvers::new(&graph).resolve_query(&context.store, &root.name, &args)? {
            Resolved::Record(record) => Some(record),
            _ => None,
        };

        Ok(GetResult {
            collection: self.collection,
            id: self.id,
            record,
        })
    }
}
