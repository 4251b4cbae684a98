mod execute;
mod execute_tests;
mod output;
mod output_tests;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

/// Show one record by id
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  json_graph get posts 1             # Post with id 1
  json_graph get users 123 -o json   # User 123 as JSON")]
pub struct GetCmd {
    /// Collection key (e.g., posts)
    pub collection: String,

    /// Record id; numeric and string ids compare loosely
    pub id: String,
}

impl CommandRunner for GetCmd {
    fn run(self, context: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(context)?;
        Ok(result.format(format))
    }
}
