//! Tenant operations for multi-tenant collections.

use serde_json::{Value, json};

use crate::connection::{Connection, ConnectionError};

/// Activity status of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantStatus {
    /// Tenant shards are loaded and queryable (`ACTIVE`)
    Active,

    /// Tenant shards are offloaded; requests against them fail (`INACTIVE`)
    Inactive,
}

impl TenantStatus {
    /// The wire tag sent in status updates.
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "ACTIVE",
            TenantStatus::Inactive => "INACTIVE",
        }
    }

    /// Parses a wire tag. Accepts the legacy `HOT`/`COLD` tags older
    /// servers still answer with.
    pub fn from_tag(tag: &str) -> Option<TenantStatus> {
        match tag {
            "ACTIVE" | "HOT" => Some(TenantStatus::Active),
            "INACTIVE" | "COLD" => Some(TenantStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tenant of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Tenant {
    pub name: String,
    pub status: TenantStatus,
}

/// Handle over `/v1/schema/<Collection>/tenants`.
pub struct TenantOperations<'a, C: Connection> {
    conn: &'a C,
    collection: String,
}

impl<'a, C: Connection> TenantOperations<'a, C> {
    pub fn new(conn: &'a C, collection: impl Into<String>) -> Self {
        TenantOperations {
            conn,
            collection: collection.into(),
        }
    }

    fn path(&self) -> String {
        format!("/v1/schema/{}/tenants", self.collection)
    }

    /// Lists all tenants of the collection.
    pub fn list(&self) -> Result<Vec<Tenant>, ConnectionError> {
        let body = self.conn.get(&self.path())?;
        let tenants = body
            .as_array()
            .map(|entries| entries.iter().filter_map(decode_tenant).collect())
            .unwrap_or_default();
        Ok(tenants)
    }

    /// Creates the named tenants. New tenants start active.
    pub fn create<I, S>(&self, names: I) -> Result<(), ConnectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = Value::Array(
            names
                .into_iter()
                .map(|name| json!({ "name": name.into() }))
                .collect(),
        );
        self.conn.post(&self.path(), &body)?;
        Ok(())
    }

    /// Removes the named tenants and their objects.
    pub fn remove<I, S>(&self, names: I) -> Result<(), ConnectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = Value::Array(
            names
                .into_iter()
                .map(|name| Value::String(name.into()))
                .collect(),
        );
        self.conn.delete(&self.path(), Some(&body))
    }

    /// Fetches one tenant; `None` when it does not exist.
    pub fn get(&self, name: &str) -> Result<Option<Tenant>, ConnectionError> {
        match self.conn.get(&format!("{}/{}", self.path(), name)) {
            Ok(body) => Ok(decode_tenant(&body)),
            Err(ConnectionError::UnexpectedStatus { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn exists(&self, name: &str) -> Result<bool, ConnectionError> {
        self.conn.head(&format!("{}/{}", self.path(), name))
    }

    pub fn activate(&self, name: &str) -> Result<(), ConnectionError> {
        self.set_status(name, TenantStatus::Active)
    }

    pub fn deactivate(&self, name: &str) -> Result<(), ConnectionError> {
        self.set_status(name, TenantStatus::Inactive)
    }

    fn set_status(&self, name: &str, status: TenantStatus) -> Result<(), ConnectionError> {
        let body = json!([{ "name": name, "activityStatus": status.as_str() }]);
        self.conn.put(&self.path(), &body)?;
        Ok(())
    }
}

// Tenants without an activityStatus are active; the server omits the field
// for defaults.
fn decode_tenant(body: &Value) -> Option<Tenant> {
    let name = body.get("name").and_then(Value::as_str)?;
    let status = body
        .get("activityStatus")
        .and_then(Value::as_str)
        .and_then(TenantStatus::from_tag)
        .unwrap_or(TenantStatus::Active);
    Some(Tenant {
        name: name.to_string(),
        status,
    })
}
