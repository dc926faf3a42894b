//! Object CRUD over the REST objects endpoint.
//!
//! When the handle is scoped to a tenant, create carries the tenant in the
//! request body (the endpoint reads it from there) and every other
//! operation carries it as the `tenant` query parameter. A request never
//! carries both forms.

use serde_json::{Value, json};

use crate::connection::{Connection, ConnectionError};

/// Handle over `/v1/objects` for one collection.
pub struct DataOperations<'a, C: Connection> {
    conn: &'a C,
    collection: String,
    tenant: Option<String>,
}

impl<'a, C: Connection> DataOperations<'a, C> {
    pub fn new(conn: &'a C, collection: impl Into<String>, tenant: Option<String>) -> Self {
        DataOperations {
            conn,
            collection: collection.into(),
            tenant,
        }
    }

    fn object_path(&self, id: &str) -> String {
        let mut path = format!("/v1/objects/{}/{}", self.collection, id);
        if let Some(tenant) = &self.tenant {
            path.push_str("?tenant=");
            path.push_str(tenant);
        }
        path
    }

    /// Creates an object. The server assigns an ID unless one is given.
    pub fn create(&self, properties: Value, id: Option<&str>) -> Result<Value, ConnectionError> {
        let mut body = serde_json::Map::new();
        body.insert("class".to_string(), Value::String(self.collection.clone()));
        body.insert("properties".to_string(), properties);
        if let Some(id) = id {
            body.insert("id".to_string(), Value::String(id.to_string()));
        }
        if let Some(tenant) = &self.tenant {
            body.insert("tenant".to_string(), Value::String(tenant.clone()));
        }
        self.conn.post("/v1/objects", &Value::Object(body))
    }

    /// Fetches one object; `None` when it does not exist.
    pub fn get(&self, id: &str) -> Result<Option<Value>, ConnectionError> {
        match self.conn.get(&self.object_path(id)) {
            Ok(object) => Ok(Some(object)),
            Err(ConnectionError::UnexpectedStatus { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Merges the given properties into the object. Unmentioned properties
    /// keep their values.
    pub fn update(&self, id: &str, properties: Value) -> Result<(), ConnectionError> {
        let body = json!({ "class": self.collection, "properties": properties });
        self.conn.patch(&self.object_path(id), &body)?;
        Ok(())
    }

    /// Replaces the object's properties wholesale.
    pub fn replace(&self, id: &str, properties: Value) -> Result<Value, ConnectionError> {
        let body = json!({ "class": self.collection, "id": id, "properties": properties });
        self.conn.put(&self.object_path(id), &body)
    }

    pub fn delete(&self, id: &str) -> Result<(), ConnectionError> {
        self.conn.delete(&self.object_path(id), None)
    }

    pub fn exists(&self, id: &str) -> Result<bool, ConnectionError> {
        self.conn.head(&self.object_path(id))
    }
}
