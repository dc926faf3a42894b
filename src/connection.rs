//! The transport contract and its HTTP implementation.
//!
//! Compilers and plumbing handles talk to the server exclusively through
//! the [`Connection`] trait: one synchronous round trip per call, JSON in
//! and JSON out. The trait implementation owns transport and status
//! handling, so callers only ever see bodies that actually arrived.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

/// Transport contract for the REST and GraphQL endpoints.
///
/// Every method blocks for exactly one request. Non-success statuses are
/// the implementation's to surface as [`ConnectionError`]; `head` is the
/// exception, answering `false` for a plain 404.
pub trait Connection {
    fn post(&self, path: &str, body: &Value) -> Result<Value, ConnectionError>;
    fn get(&self, path: &str) -> Result<Value, ConnectionError>;
    fn put(&self, path: &str, body: &Value) -> Result<Value, ConnectionError>;
    fn patch(&self, path: &str, body: &Value) -> Result<Value, ConnectionError>;
    fn delete(&self, path: &str, body: Option<&Value>) -> Result<(), ConnectionError>;
    fn head(&self, path: &str) -> Result<bool, ConnectionError>;
}

/// Errors raised by a connection.
#[derive(Debug)]
pub enum ConnectionError {
    /// Transport-level failure (connect, timeout, TLS)
    Http(reqwest::Error),

    /// The server answered with a non-success status
    UnexpectedStatus { status: u16, body: String },

    /// The response body was not valid JSON
    Json(serde_json::Error),

    /// Invalid connection configuration
    Config(String),
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::Http(e) => write!(f, "HTTP error: {}", e),
            ConnectionError::UnexpectedStatus { status, body } => {
                write!(f, "Unexpected status code {}: {}", status, body)
            }
            ConnectionError::Json(e) => write!(f, "Invalid JSON in response: {}", e),
            ConnectionError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectionError::Http(e) => Some(e),
            ConnectionError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConnectionError {
    fn from(e: reqwest::Error) -> Self {
        ConnectionError::Http(e)
    }
}

impl From<serde_json::Error> for ConnectionError {
    fn from(e: serde_json::Error) -> Self {
        ConnectionError::Json(e)
    }
}

/// Connection settings.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the deployment (e.g. `"http://localhost:8080"`)
    pub base_url: String,

    /// API key sent as a bearer token on every request
    pub api_key: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Extra headers sent on every request
    pub headers: Vec<(String, String)>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            base_url: "http://localhost:8080".into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            headers: Vec::new(),
        }
    }
}

/// Blocking HTTP connection over a pooled `reqwest` client.
pub struct HttpConnection {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpConnection {
    /// Builds the client with the configured timeout and default headers.
    pub fn new(config: ConnectionConfig) -> Result<Self, ConnectionError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| ConnectionError::Config(format!("invalid api key: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ConnectionError::Config(format!("invalid header '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ConnectionError::Config(format!("invalid header '{}': {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(HttpConnection {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and decodes the body. Statuses at or above 400
    /// become [`ConnectionError::UnexpectedStatus`] with the body text;
    /// empty success bodies decode as `null`.
    fn execute(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Value, ConnectionError> {
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        if status >= 400 {
            return Err(ConnectionError::UnexpectedStatus { status, body });
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl Connection for HttpConnection {
    fn post(&self, path: &str, body: &Value) -> Result<Value, ConnectionError> {
        tracing::debug!(path = %path, "POST");
        self.execute(self.client.post(self.url(path)).json(body))
    }

    fn get(&self, path: &str) -> Result<Value, ConnectionError> {
        tracing::debug!(path = %path, "GET");
        self.execute(self.client.get(self.url(path)))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, ConnectionError> {
        tracing::debug!(path = %path, "PUT");
        self.execute(self.client.put(self.url(path)).json(body))
    }

    fn patch(&self, path: &str, body: &Value) -> Result<Value, ConnectionError> {
        tracing::debug!(path = %path, "PATCH");
        self.execute(self.client.patch(self.url(path)).json(body))
    }

    fn delete(&self, path: &str, body: Option<&Value>) -> Result<(), ConnectionError> {
        tracing::debug!(path = %path, "DELETE");
        let mut request = self.client.delete(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).map(|_| ())
    }

    fn head(&self, path: &str) -> Result<bool, ConnectionError> {
        tracing::debug!(path = %path, "HEAD");
        let response = self.client.head(self.url(path)).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(ConnectionError::UnexpectedStatus {
                status: status.as_u16(),
                body: String::new(),
            })
        }
    }
}
