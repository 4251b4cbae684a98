use std::error::Error;

use serde::Serialize;

use db::schema::RootOperation;
use db::{Resolved, Resolvers};

use super::CountCmd;
use crate::commands::{root_field, Context, Execute};

/// Result of the count command execution
#[derive(Debug, Default, Serialize)]
pub struct CountResult {
    pub collection: String,
    pub count: usize,
}

impl Execute for CountCmd {
    type Output = CountResult;

    fn execute(self, context: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let graph = context.schema()?;
        let root = root_field(&graph, &self.collection, RootOperation::Meta)?;
        let args = self.window.to_arguments()?;

        let count = match Resolvers::new(&graph).resolve_query(&context.store, &root.name, &args)? {
            Resolved::Meta { count } => count,
            _ => 0,
        };

        Ok(CountResult {
            collection: self.collection,
            count,
        })
    }
}
