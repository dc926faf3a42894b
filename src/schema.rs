//! Collection schema operations over the REST schema endpoint.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::connection::{Connection, ConnectionError};

static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn name_pattern() -> &'static Regex {
    NAME_PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][_0-9A-Za-z]{0,254}$").unwrap())
}

/// Errors raised by schema operations.
#[derive(Debug)]
pub enum SchemaError {
    /// Collection name outside the accepted grammar
    InvalidName(String),

    /// Transport failure
    Connection(ConnectionError),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::InvalidName(name) => {
                write!(
                    f,
                    "Invalid collection name '{}': must match [A-Za-z][_0-9A-Za-z]{{0,254}}",
                    name
                )
            }
            SchemaError::Connection(e) => write!(f, "Connection error: {}", e),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Connection(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConnectionError> for SchemaError {
    fn from(e: ConnectionError) -> Self {
        SchemaError::Connection(e)
    }
}

/// Validates a collection name and capitalizes its first letter.
///
/// Names are spliced bare into compiled documents and request paths, so
/// the grammar is enforced before any request is built. The server
/// capitalizes class names on creation; normalizing here keeps lookups and
/// queries pointed at the same class.
pub(crate) fn normalize_name(name: &str) -> Result<String, SchemaError> {
    if !name_pattern().is_match(name) {
        return Err(SchemaError::InvalidName(name.to_string()));
    }
    let mut normalized = String::with_capacity(name.len());
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        normalized.push(first.to_ascii_uppercase());
    }
    normalized.push_str(chars.as_str());
    Ok(normalized)
}

/// Handle over the `/v1/schema` endpoint.
pub struct Collections<'a, C: Connection> {
    conn: &'a C,
}

impl<'a, C: Connection> Collections<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Collections { conn }
    }

    /// Creates a collection. `config` supplies any additional class
    /// definition fields (properties, vectorizer, multi-tenancy settings);
    /// the class name itself is always taken from `name`.
    pub fn create(&self, name: &str, config: Option<Value>) -> Result<Value, SchemaError> {
        let class = normalize_name(name)?;
        let mut body = match config {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        body.insert("class".to_string(), Value::String(class));
        Ok(self.conn.post("/v1/schema", &Value::Object(body))?)
    }

    /// Fetches a collection definition; `None` when it does not exist.
    pub fn get(&self, name: &str) -> Result<Option<Value>, SchemaError> {
        let class = normalize_name(name)?;
        match self.conn.get(&format!("/v1/schema/{}", class)) {
            Ok(definition) => Ok(Some(definition)),
            Err(ConnectionError::UnexpectedStatus { status: 404, .. }) => Ok(None),
            Err(e) => Err(SchemaError::Connection(e)),
        }
    }

    pub fn exists(&self, name: &str) -> Result<bool, SchemaError> {
        Ok(self.get(name)?.is_some())
    }

    pub fn delete(&self, name: &str) -> Result<(), SchemaError> {
        let class = normalize_name(name)?;
        Ok(self.conn.delete(&format!("/v1/schema/{}", class), None)?)
    }

    /// Lists the names of all collections in the deployment.
    pub fn list(&self) -> Result<Vec<String>, SchemaError> {
        let schema = self.conn.get("/v1/schema")?;
        let names = schema
            .get("classes")
            .and_then(Value::as_array)
            .map(|classes| {
                classes
                    .iter()
                    .filter_map(|class| class.get("class").and_then(Value::as_str))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(names)
    }
}
