use std::error::Error;

use serde::Serialize;

use db::schema::RootOperation;
use db::{Record, Resolved, Resolvers, SortOrder};

use super::ListCmd;
use crate::commands::{root_field, Context, Execute};

/// Result of the list command execution
#[derive(Debug, Default, Serialize)]
pub struct ListResult {
    pub collection: String,
    pub records: Vec<Record>,
}

impl Execute for ListCmd {
    type Output = ListResult;

    fn execute(self, context: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let graph = context.schema()?;
        let root = root_field(&graph, &self.collection, RootOperation::List)?;

        let mut args = self.window.to_arguments()?;
        if let Some(field) = self.sort_field {
            args.insert("sortField".to_string(), field.into());
            let order = match self.sort_order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            args.insert("sortOrder".to_string(), order.into());
        }

        let records = match Resolvers::new(&graph).resolve_query(&context.store, &root.name, &args)? {
            Resolved::Records(records) => records,
            _ => Vec::new(),
        };

        Ok(ListResult {
            collection: self.collection,
            records,
        })
    }
}
