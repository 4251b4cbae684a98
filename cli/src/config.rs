//! Configuration file handling.
//!
//! This module provides loading and parsing of `.json_graph.json`
//! configuration files, which hold relationship overrides:
//!
//! ```json
//! {
//!     "relationships": {
//!         "posts": {
//!             "author_id": { "ref": "users", "field": "Author", "foreignField": "AuthoredPosts" }
//!         }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use db::OverrideConfig;

/// Configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".json_graph.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error(
        "Invalid JSON in {path}: {message}\n\n\
         Expected a file like:\n\
         {{\n  \
           \"relationships\": {{\n    \
             \"posts\": {{\n      \
               \"author_id\": {{ \"ref\": \"users\", \"field\": \"Author\", \"foreignField\": \"AuthoredPosts\" }}\n    \
             }}\n  \
           }}\n\
         }}"
    )]
    InvalidJson { path: String, message: String },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Relationship overrides keyed by collection, then field
    #[serde(default)]
    pub relationships: OverrideConfig,
}

impl ConfigFile {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `.json_graph.json` in the
    /// current directory is used when present and an empty configuration
    /// otherwise.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit_path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound {
                path: path.display().to_string(),
            }),
            Some(path) => Self::from_path(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_path(&default_path)
                } else {
                    tracing::debug!("no configuration file, using naming conventions only");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
