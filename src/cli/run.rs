//! Execute query spec documents against a live deployment

use serde_json::Value;

use super::{CliError, json_to_aggregate_spec, json_to_query_spec};
use crate::aggregate::AggregateBuilder;
use crate::connection::{ConnectionConfig, HttpConnection};
use crate::query::QueryBuilder;
use crate::schema::Collections;

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Query spec document as JSON text
    pub spec: String,
    /// Base URL of the deployment
    pub url: String,
    /// API key sent as a bearer token
    pub api_key: Option<String>,
    /// Execute under the aggregation grammar
    pub aggregate: bool,
}

fn open(url: &str, api_key: Option<&str>) -> Result<HttpConnection, CliError> {
    let config = ConnectionConfig {
        base_url: url.to_string(),
        api_key: api_key.map(String::from),
        ..ConnectionConfig::default()
    };
    Ok(HttpConnection::new(config)?)
}

/// Compile a spec document and execute it, returning the rows
pub fn execute_run(options: &RunOptions) -> Result<Vec<Value>, CliError> {
    let document: Value = serde_json::from_str(&options.spec)?;
    let conn = open(&options.url, options.api_key.as_deref())?;

    let rows = if options.aggregate {
        let spec = json_to_aggregate_spec(&document)?;
        AggregateBuilder::from_spec(&conn, spec).execute()?
    } else {
        let spec = json_to_query_spec(&document)?;
        QueryBuilder::from_spec(&conn, spec).fetch_objects()?
    };
    Ok(rows)
}

/// List the collection names of a deployment
pub fn execute_collections(url: &str, api_key: Option<&str>) -> Result<Vec<String>, CliError> {
    let conn = open(url, api_key)?;
    Ok(Collections::new(&conn).list()?)
}
