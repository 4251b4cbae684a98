use std::error::Error;

use serde::Serialize;

use db::{Resolved, Resolvers};

use super::ResolveCmd;
use crate::commands::{parse_json_object, Context, Execute};

/// Result of the resolve command execution
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    pub field: String,
    pub mutation: bool,
    pub result: Resolved,
}

impl Execute for ResolveCmd {
    type Output = ResolveResult;

    fn execute(self, context: &mut Context) -> Result<Self::Output, Box<dyn Error>> {
        let graph = context.schema()?;
        let resolvers = Resolvers::new(&graph);
        let args = parse_json_object("--args", self.args.as_deref())?;

        let result = if self.mutation {
            resolvers.resolve_mutation(&mut context.store, &self.field, &args)?
        } else {
            resolvers.resolve_query(&context.store, &self.field, &args)?
        };

        Ok(ResolveResult {
            field: self.field,
            mutation: self.mutation,
            result,
        })
    }
}
