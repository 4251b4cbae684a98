use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
pub mod output;
#[macro_use]
mod test_macros;
use cli::Args;
use commands::{CommandRunner, Context};
use config::ConfigFile;
use db::RecordStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let data_path = cli::resolve_data_path(args.data);
    let config = ConfigFile::load(args.config.as_deref())?;
    tracing::debug!(data = %data_path.display(), "loading records");
    let store = RecordStore::from_path(&data_path)?;

    let mut context = Context::new(store, config.relationships);
    let output = args.command.run(&mut context, args.format)?;
    println!("{}", output);
    Ok(())
}

/// Log to stderr. `--verbose` forces debug output, otherwise `RUST_LOG`
/// applies and defaults to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
