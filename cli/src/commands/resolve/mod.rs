mod execute;
mod output;
mod output_tests;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

/// Invoke a root query or mutation field by name
///
/// Mutations change the loaded records in memory only; the data file is
/// never written.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  json_graph resolve allPosts --args '{\"sortField\": \"views\", \"sortOrder\": \"desc\"}'
  json_graph resolve _allCommentsMeta --args '{\"filter\": {\"post_id\": 1}}'
  json_graph resolve Post --args '{\"id\": 1}'
  json_graph resolve updatePost --mutation --args '{\"id\": 1, \"views\": 300}'
  json_graph resolve removeUser --mutation --args '{\"id\": 123}'")]
pub struct ResolveCmd {
    /// Root field name (e.g., allPosts, createPost)
    pub field: String,

    /// Field arguments as a JSON object
    #[arg(short, long)]
    pub args: Option<String>,

    /// Resolve against the Mutation root instead of Query
    #[arg(short, long, default_value_t = false)]
    pub mutation: bool,
}

impl CommandRunner for ResolveCmd {
    fn run(self, context: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(context)?;
        Ok(result.format(format))
    }
}
