//! Client facade and collection handles.
//!
//! [`Client`] owns the HTTP connection; [`Collection`] handles are cheap
//! scoped views that seed query and aggregation builders with the
//! collection name and, when set, the tenant.

use std::time::Duration;

use crate::aggregate::AggregateBuilder;
use crate::connection::{Connection, ConnectionConfig, ConnectionError, HttpConnection};
use crate::data::DataOperations;
use crate::query::QueryBuilder;
use crate::schema::{self, Collections, SchemaError};
use crate::tenants::TenantOperations;

/// The entry point for talking to a deployment.
///
/// # Examples
///
/// ```no_run
/// use sprig::client::Client;
///
/// let client = Client::builder()
///     .endpoint("https://db.example.com")
///     .api_key("secret")
///     .build()?;
///
/// assert!(client.is_ready()?);
/// # Ok::<(), sprig::connection::ConnectionError>(())
/// ```
pub struct Client {
    conn: HttpConnection,
}

impl Client {
    /// Connects to `http://localhost:8080` with default settings.
    pub fn connect_to_local() -> Result<Client, ConnectionError> {
        Client::builder().build()
    }

    /// Connects to the given base URL with default settings.
    pub fn connect(base_url: &str) -> Result<Client, ConnectionError> {
        Client::builder().endpoint(base_url).build()
    }

    /// Creates a builder for a fully configured client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder {
            config: ConnectionConfig::default(),
        }
    }

    /// Whether the deployment answers its liveness probe.
    pub fn is_live(&self) -> Result<bool, ConnectionError> {
        self.probe("/v1/.well-known/live")
    }

    /// Whether the deployment reports itself ready for requests.
    pub fn is_ready(&self) -> Result<bool, ConnectionError> {
        self.probe("/v1/.well-known/ready")
    }

    // A refused probe is an answer, not a failure.
    fn probe(&self, path: &str) -> Result<bool, ConnectionError> {
        match self.conn.get(path) {
            Ok(_) => Ok(true),
            Err(ConnectionError::UnexpectedStatus { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Handle over the deployment's collection schema.
    pub fn collections(&self) -> Collections<'_, HttpConnection> {
        Collections::new(&self.conn)
    }

    /// Handle over one collection. The name is validated and its first
    /// letter capitalized to match the server's class naming.
    pub fn collection(&self, name: &str) -> Result<Collection<'_, HttpConnection>, SchemaError> {
        Ok(Collection::new(&self.conn, schema::normalize_name(name)?))
    }
}

/// Builder for configuring a [`Client`].
pub struct ClientBuilder {
    config: ConnectionConfig,
}

impl ClientBuilder {
    /// Sets the base URL of the deployment.
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.config.base_url = endpoint.to_string();
        self
    }

    /// Sets the API key sent as a bearer token on every request.
    pub fn api_key(mut self, key: &str) -> Self {
        self.config.api_key = Some(key.to_string());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Adds a header sent on every request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.config.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client, ConnectionError> {
        tracing::info!(endpoint = %self.config.base_url, "connecting");
        Ok(Client {
            conn: HttpConnection::new(self.config)?,
        })
    }
}

/// Scoped view of one collection.
///
/// Holds a borrowed connection, so handles are cheap to create. Scoping a
/// tenant with [`with_tenant`] threads it into every builder and data
/// operation created from the handle.
///
/// [`with_tenant`]: Collection::with_tenant
pub struct Collection<'a, C: Connection> {
    conn: &'a C,
    name: String,
    tenant: Option<String>,
}

impl<'a, C: Connection> Collection<'a, C> {
    /// Wraps a connection and collection name as given. Use
    /// [`Client::collection`] for validated, normalized names.
    pub fn new(conn: &'a C, name: impl Into<String>) -> Self {
        Collection {
            conn,
            name: name.into(),
            tenant: None,
        }
    }

    /// Scopes all operations on this handle to a tenant.
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    /// Starts an object query against this collection.
    pub fn query(&self) -> QueryBuilder<'a, C> {
        let builder = QueryBuilder::new(self.conn, self.name.clone());
        match &self.tenant {
            Some(tenant) => builder.with_tenant(tenant.clone()),
            None => builder,
        }
    }

    /// Starts an aggregation against this collection.
    pub fn aggregate(&self) -> AggregateBuilder<'a, C> {
        let builder = AggregateBuilder::new(self.conn, self.name.clone());
        match &self.tenant {
            Some(tenant) => builder.with_tenant(tenant.clone()),
            None => builder,
        }
    }

    /// Object CRUD scoped to this collection (and tenant, when set).
    pub fn data(&self) -> DataOperations<'a, C> {
        DataOperations::new(self.conn, self.name.clone(), self.tenant.clone())
    }

    /// Tenant operations for this collection.
    pub fn tenants(&self) -> TenantOperations<'a, C> {
        TenantOperations::new(self.conn, self.name.clone())
    }
}
