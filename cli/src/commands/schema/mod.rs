mod execute;
mod output;
mod output_tests;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

/// Print the schema inferred from the data
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  json_graph schema                      # GraphQL SDL of all collections
  json_graph schema --relationships      # Only the detected relationships
  json_graph schema -o json              # Types and relationships as JSON")]
pub struct SchemaCmd {
    /// Only list the relationships between collections
    #[arg(short, long, default_value_t = false)]
    pub relationships: bool,
}

impl CommandRunner for SchemaCmd {
    fn run(self, context: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(context)?;
        Ok(result.format(format))
    }
}
