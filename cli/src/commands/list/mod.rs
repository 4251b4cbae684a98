mod execute;
mod output;
mod output_tests;

use std::error::Error;

use clap::Args;
use db::SortOrder;

use crate::commands::{CommandRunner, Context, Execute, WindowArgs};
use crate::output::{OutputFormat, Outputable};

/// List records with filtering, sorting and pagination
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  json_graph list posts                                  # All posts
  json_graph list posts --sort-field views --sort-order desc
  json_graph list posts --page 0 --per-page 10           # First ten posts
  json_graph list posts -f '{\"q\": \"lorem\"}'            # Full-text search
  json_graph list comments -f '{\"post_id\": 1}'         # Comments of post 1
  json_graph list posts -f '{\"views_gte\": 100}'        # Range filter")]
pub struct ListCmd {
    /// Collection key (e.g., posts)
    pub collection: String,

    /// Field to sort by
    #[arg(long)]
    pub sort_field: Option<String>,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub sort_order: SortOrder,

    #[command(flatten)]
    pub window: WindowArgs,
}

impl CommandRunner for ListCmd {
    fn run(self, context: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(context)?;
        Ok(result.format(format))
    }
}
