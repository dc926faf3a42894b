//! Compile query spec documents into GraphQL

use super::{CliError, json_to_aggregate_spec, json_to_query_spec};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Query spec document as JSON text
    pub spec: String,
    /// Compile under the aggregation grammar
    pub aggregate: bool,
}

/// Compile a spec document into a GraphQL query document
pub fn execute_compile(options: &CompileOptions) -> Result<String, CliError> {
    let document: serde_json::Value = serde_json::from_str(&options.spec)?;
    if options.aggregate {
        Ok(json_to_aggregate_spec(&document)?.to_graphql())
    } else {
        Ok(json_to_query_spec(&document)?.to_graphql())
    }
}
