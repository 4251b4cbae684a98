//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON data file
    ///
    /// If not specified, searches for data in:
    ///   1. ./db.json (current directory)
    ///   2. ~/.json_graph/db.json (user-global)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Path to the relationship configuration file
    ///
    /// Defaults to .json_graph.json in the current directory when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Resolve the data file by checking multiple locations in order of preference
pub fn resolve_data_path(explicit_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit_path {
        return path;
    }

    // 1. Check ./db.json (current directory)
    let local_data = PathBuf::from("db.json");
    if local_data.exists() {
        return local_data;
    }

    // 2. Check ~/.json_graph/db.json (user-global)
    if let Some(home_dir) = home::home_dir() {
        let global_data = home_dir.join(".json_graph/db.json");
        if global_data.exists() {
            return global_data;
        }
    }

    // Default: ./db.json (reported as missing when loaded)
    local_data
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;

    #[rstest]
    fn test_explicit_data_path_wins() {
        let path = resolve_data_path(Some(PathBuf::from("/tmp/other.json")));
        assert_eq!(path, PathBuf::from("/tmp/other.json"));
    }

    #[rstest]
    #[serial]
    fn test_local_data_file_is_found() {
        let old_dir = std::env::current_dir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("db.json"), "{}").unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let path = resolve_data_path(None);

        std::env::set_current_dir(old_dir).unwrap();
        assert_eq!(path, PathBuf::from("db.json"));
    }

    #[rstest]
    fn test_global_flags_parse_after_subcommand() {
        let args = Args::try_parse_from([
            "json_graph",
            "schema",
            "--data",
            "data.json",
            "--config",
            "rels.json",
            "-o",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.data, Some(PathBuf::from("data.json")));
        assert_eq!(args.config, Some(PathBuf::from("rels.json")));
        assert!(matches!(args.format, OutputFormat::Json));
        assert!(args.verbose);
    }

    #[rstest]
    fn test_defaults() {
        let args = Args::try_parse_from(["json_graph", "schema"]).unwrap();
        assert_eq!(args.data, None);
        assert!(matches!(args.format, OutputFormat::Table));
        assert!(!args.verbose);
    }
}
