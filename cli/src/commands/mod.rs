//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - `mod.rs`: the command struct with clap attributes for CLI parsing
//! - `execute.rs`: the result type and the [`Execute`] implementation
//! - `output.rs`: table formatting of the result
//!
//! Commands run against a [`Context`] holding the loaded records and the
//! relationship overrides. The schema is composed from the context on demand,
//! so mutations made by one command are visible to schema-derived lookups.

mod count;
mod get;
mod list;
mod related;
mod resolve;
mod schema;

pub use count::CountCmd;
pub use get::GetCmd;
pub use list::ListCmd;
pub use related::RelatedCmd;
pub use resolve::ResolveCmd;
pub use schema::SchemaCmd;

use clap::{Args, Subcommand};
use enum_dispatch::enum_dispatch;
use std::error::Error;
use thiserror::Error;

use db::schema::{RootField, RootOperation};
use db::{compose_schema, Arguments, OverrideConfig, QueryError, RecordStore, SchemaError, SchemaGraph};

use crate::output::{OutputFormat, Outputable};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid JSON for {option}: {message}")]
    InvalidJson { option: String, message: String },

    #[error("{option} must be a JSON object")]
    NotAnObject { option: String },

    #[error("No record with id '{id}' in collection '{collection}'")]
    RecordNotFound { collection: String, id: String },

    #[error("Field '{field}' of type '{type_name}' is not a relationship")]
    NotARelationship { type_name: String, field: String },
}

/// Loaded records and relationship overrides shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub store: RecordStore,
    pub overrides: OverrideConfig,
}

impl Context {
    pub fn new(store: RecordStore, overrides: OverrideConfig) -> Self {
        Self { store, overrides }
    }

    /// Compose the schema of the current records.
    pub fn schema(&self) -> Result<SchemaGraph, SchemaError> {
        compose_schema(&self.store, &self.overrides)
    }
}

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, context: &mut Context) -> Result<Self::Output, Box<dyn Error>>;
}

/// Trait for running a command and formatting its result.
#[enum_dispatch]
pub trait CommandRunner {
    fn run(self, context: &mut Context, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
#[enum_dispatch(CommandRunner)]
pub enum Command {
    /// Print the schema inferred from the data
    Schema(SchemaCmd),

    /// Show one record by id
    Get(GetCmd),

    /// List records with filtering, sorting and pagination
    List(ListCmd),

    /// Count records matching a filter
    Count(CountCmd),

    /// Follow a relationship field from one record
    Related(RelatedCmd),

    /// Invoke a root query or mutation field by name
    Resolve(ResolveCmd),
}

/// Paging and filter options shared by the listing commands
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct WindowArgs {
    /// Zero-based page number
    #[arg(long)]
    pub page: Option<i64>,

    /// Records per page (25 when only --page is given; ignored without --page)
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Filter as a JSON object, e.g. '{"q": "lorem", "views_gte": 100}'
    #[arg(short, long)]
    pub filter: Option<String>,
}

impl WindowArgs {
    /// Field arguments for the paging and filter options that were given.
    pub fn to_arguments(&self) -> Result<Arguments, CommandError> {
        let mut args = Arguments::new();
        if let Some(page) = self.page {
            args.insert("page".to_string(), page.into());
        }
        if let Some(per_page) = self.per_page {
            args.insert("perPage".to_string(), per_page.into());
        }
        if self.filter.is_some() {
            let filter = parse_json_object("--filter", self.filter.as_deref())?;
            args.insert("filter".to_string(), serde_json::Value::Object(filter));
        }
        Ok(args)
    }
}

/// Parse an optional JSON object given on the command line.
pub fn parse_json_object(option: &str, raw: Option<&str>) -> Result<Arguments, CommandError> {
    let Some(raw) = raw else {
        return Ok(Arguments::new());
    };
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| CommandError::InvalidJson {
            option: option.to_string(),
            message: e.to_string(),
        })?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(CommandError::NotAnObject {
            option: option.to_string(),
        }),
    }
}

/// Root field performing `operation` on `collection`.
pub fn root_field<'g>(
    graph: &'g SchemaGraph,
    collection: &str,
    operation: RootOperation,
) -> Result<&'g RootField, QueryError> {
    graph
        .root_field(collection, operation)
        .ok_or_else(|| QueryError::UnknownCollection {
            collection: collection.to_string(),
        })
}
