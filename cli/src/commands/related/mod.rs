mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

/// Follow a relationship field from one record
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  json_graph related posts 1 User                    # Author of post 1
  json_graph related posts 1 Comments                # Comments on post 1
  json_graph related users 123 Posts -f '{\"q\": \"lorem\"}'
  json_graph related posts 1 Fans --config rels.json # Many-to-many via overrides")]
pub struct RelatedCmd {
    /// Collection key of the starting record (e.g., posts)
    pub collection: String,

    /// Id of the starting record
    pub id: String,

    /// Relationship field as named in the schema (e.g., Comments)
    pub field: String,

    /// Filter the related records, as a JSON object
    #[arg(short, long)]
    pub filter: Option<String>,
}

impl CommandRunner for RelatedCmd {
    fn run(self, context: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(context)?;
        Ok(result.format(format))
    }
}
