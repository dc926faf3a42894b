//! Response envelope decoding and the query error taxonomy.
//!
//! Every query and aggregation answer arrives as a GraphQL envelope:
//! `errors` when the server rejected or partially failed the request,
//! `data` holding the result tree otherwise. Decoding distinguishes three
//! situations that callers must not confuse:
//!
//! - **protocol failure** - the envelope carries `errors`
//! - **shape failure** - no errors, but the result tree is missing where
//!   the grammar guarantees it (aggregations only)
//! - **empty result** - a well-formed answer with nothing in it

use serde_json::Value;

use crate::connection::ConnectionError;

/// One raw error entry from a response envelope.
///
/// Fields are kept as they arrived; `path` and `locations` stay untyped
/// because servers disagree on their shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLError {
    pub message: Option<String>,
    pub path: Option<Value>,
    pub locations: Option<Value>,
}

impl GraphQLError {
    fn from_entry(entry: &Value) -> GraphQLError {
        GraphQLError {
            message: entry
                .get("message")
                .and_then(Value::as_str)
                .map(String::from),
            path: entry.get("path").cloned(),
            locations: entry.get("locations").cloned(),
        }
    }
}

/// Errors surfaced while executing a query or aggregation.
#[derive(Debug)]
pub enum QueryError {
    /// The server reported errors in the envelope
    GraphQL {
        /// Joined one-line summary, already prefixed for the failing grammar
        message: String,
        /// The raw entries, for detailed reporting
        errors: Vec<GraphQLError>,
    },

    /// The envelope carried no errors but not the expected result shape
    InvalidResponse(String),

    /// Transport failure, propagated untouched
    Connection(ConnectionError),
}

impl QueryError {
    /// Renders every raw error entry over three lines: message, path,
    /// locations. Absent fields render as `Unknown` and `[]`.
    pub fn detailed_report(&self) -> String {
        match self {
            QueryError::GraphQL { errors, .. } => {
                let entries: Vec<String> = errors
                    .iter()
                    .map(|entry| {
                        format!(
                            "Error: {}\nPath: {}\nLocations: {}",
                            entry.message.as_deref().unwrap_or("Unknown"),
                            entry.path.as_ref().cloned().unwrap_or_else(empty_list),
                            entry
                                .locations
                                .as_ref()
                                .cloned()
                                .unwrap_or_else(empty_list),
                        )
                    })
                    .collect();
                entries.join("\n")
            }
            other => other.to_string(),
        }
    }
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::GraphQL { message, .. } => write!(f, "{}", message),
            QueryError::InvalidResponse(msg) => write!(f, "{}", msg),
            QueryError::Connection(e) => write!(f, "Connection error: {}", e),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Connection(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConnectionError> for QueryError {
    fn from(e: ConnectionError) -> Self {
        QueryError::Connection(e)
    }
}

/// Extracts the error entries when the envelope reports any.
fn protocol_errors(envelope: &Value) -> Option<Vec<GraphQLError>> {
    let entries = envelope.get("errors")?.as_array()?;
    if entries.is_empty() {
        return None;
    }
    Some(entries.iter().map(GraphQLError::from_entry).collect())
}

/// Joins entry messages for the one-line summary.
fn joined_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_deref().unwrap_or("Unknown error"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decodes a `Get` envelope into rows.
///
/// Lenient on shape: if `data.Get.<collection>` is absent or not a list,
/// the result is an empty row list. An empty answer is not a failure.
pub fn parse_get(mut envelope: Value, collection: &str) -> Result<Vec<Value>, QueryError> {
    if let Some(errors) = protocol_errors(&envelope) {
        return Err(QueryError::GraphQL {
            message: format!("GraphQL query failed: {}", joined_messages(&errors)),
            errors,
        });
    }
    let rows = envelope
        .pointer_mut(&format!("/data/Get/{}", collection))
        .map(Value::take)
        .and_then(|v| match v {
            Value::Array(rows) => Some(rows),
            _ => None,
        })
        .unwrap_or_default();
    Ok(rows)
}

/// Decodes an `Aggregate` envelope into aggregation rows.
///
/// Strict on shape: with no errors reported, `data.Aggregate.<collection>`
/// must be present as a list or the envelope is rejected.
pub fn parse_aggregate(mut envelope: Value, collection: &str) -> Result<Vec<Value>, QueryError> {
    if let Some(errors) = protocol_errors(&envelope) {
        return Err(QueryError::GraphQL {
            message: format!(
                "GraphQL aggregation query failed: {}",
                joined_messages(&errors)
            ),
            errors,
        });
    }
    envelope
        .pointer_mut(&format!("/data/Aggregate/{}", collection))
        .map(Value::take)
        .and_then(|v| match v {
            Value::Array(rows) => Some(rows),
            _ => None,
        })
        .ok_or_else(|| QueryError::InvalidResponse("Invalid aggregation response format".to_string()))
}
