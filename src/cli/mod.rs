//! CLI support for sprig
//!
//! Provides programmatic access to sprig CLI functionality for embedding
//! in other tools.

mod compile;
mod convert;
mod run;

pub use compile::{CompileOptions, execute_compile};
pub use convert::{filter_to_json, json_to_aggregate_spec, json_to_filter, json_to_query_spec};
pub use run::{RunOptions, execute_collections, execute_run};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Malformed filter or query spec document
    BadSpec(String),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// Query execution error
    Query(crate::QueryError),
    /// Connection error
    Connection(crate::ConnectionError),
    /// Schema operation error
    Schema(crate::SchemaError),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::BadSpec(msg) => write!(f, "Invalid query spec: {}", msg),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Query(e) => write!(f, "{}", e),
            CliError::Connection(e) => write!(f, "Connection error: {}", e),
            CliError::Schema(e) => write!(f, "{}", e),
            CliError::NoInput => {
                write!(f, "No input provided. Pass a spec document or pipe JSON to stdin.")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Query(e) => Some(e),
            CliError::Connection(e) => Some(e),
            CliError::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<crate::QueryError> for CliError {
    fn from(e: crate::QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<crate::ConnectionError> for CliError {
    fn from(e: crate::ConnectionError) -> Self {
        CliError::Connection(e)
    }
}

impl From<crate::SchemaError> for CliError {
    fn from(e: crate::SchemaError) -> Self {
        CliError::Schema(e)
    }
}
