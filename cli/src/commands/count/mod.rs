mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute, WindowArgs};
use crate::output::{OutputFormat, Outputable};

/// Count records matching a filter
///
/// Paging options window the count the same way they window a listing.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  json_graph count posts                             # Number of posts
  json_graph count comments -f '{\"post_id\": 1}'    # Comments of post 1
  json_graph count posts --page 1 --per-page 10      # Size of the second page")]
pub struct CountCmd {
    /// Collection key (e.g., posts)
    pub collection: String,

    #[command(flatten)]
    pub window: WindowArgs,
}

impl CommandRunner for CountCmd {
    fn run(self, context: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(context)?;
        Ok(result.format(format))
    }
}
