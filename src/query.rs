//! Object query compilation and execution.
//!
//! A [`QuerySpec`] captures everything one `Get` query needs (collection,
//! filter, pagination, field selection, tenant) and compiles it to a
//! GraphQL document. [`QueryBuilder`] is the fluent front: setters consume
//! and return the builder, and the terminal [`fetch_objects`] performs
//! exactly one round trip through the connection.
//!
//! [`fetch_objects`]: QueryBuilder::fetch_objects

use serde_json::json;

use crate::connection::Connection;
use crate::filter::FilterExpr;
use crate::graphql;
use crate::response::{self, QueryError};

/// The complete specification of one object query.
///
/// Plain data: building a spec performs no I/O and no validation beyond
/// what the typed fields enforce. Compilation is deterministic, so the
/// same spec always yields the same document.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    /// Collection to query
    pub collection: String,

    /// Root filter expression, if any
    pub where_filter: Option<FilterExpr>,

    /// Maximum number of rows; `Some(0)` is emitted as given
    pub limit: Option<u32>,

    /// Properties to return, in order
    pub return_properties: Vec<String>,

    /// Reference properties to expand: `(relation, properties)`, in order
    pub return_references: Vec<(String, Vec<String>)>,

    /// Field list used when no properties are requested
    pub default_fields: String,

    /// Tenant carried as an in-document argument
    pub tenant: Option<String>,
}

impl QuerySpec {
    pub fn new(collection: impl Into<String>) -> Self {
        QuerySpec {
            collection: collection.into(),
            ..QuerySpec::default()
        }
    }

    /// Compiles the spec into a GraphQL `Get` document.
    ///
    /// Field resolution: requested properties (plus `_additional { id }`)
    /// win; otherwise the configured default fields; otherwise
    /// `_additional { id }` alone. Arguments appear in the fixed order
    /// `where`, `limit`, `tenant` and the argument list is omitted entirely
    /// when empty. Each reference expansion appends an inline fragment
    /// typed on the queried collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::query::QuerySpec;
    ///
    /// let mut spec = QuerySpec::new("Article");
    /// spec.limit = Some(10);
    /// assert_eq!(
    ///     spec.to_graphql(),
    ///     "query { Get { Article(limit: 10) { _additional { id } } } }"
    /// );
    /// ```
    pub fn to_graphql(&self) -> String {
        let mut fields = if self.return_properties.is_empty() {
            if self.default_fields.is_empty() {
                "_additional { id }".to_string()
            } else {
                self.default_fields.clone()
            }
        } else {
            let mut listed = self.return_properties.join(" ");
            listed.push_str(" _additional { id }");
            listed
        };

        for (relation, properties) in &self.return_references {
            fields.push_str(&format!(
                " {} {{ ... on {} {{ {} }} }}",
                relation,
                self.collection,
                properties.join(" ")
            ));
        }

        let mut args = Vec::new();
        if let Some(expr) = &self.where_filter {
            args.push(format!("where: {}", graphql::filter_literal(expr)));
        }
        if let Some(limit) = self.limit {
            args.push(format!("limit: {}", limit));
        }
        if let Some(tenant) = &self.tenant {
            args.push(format!("tenant: {}", graphql::string_literal(tenant)));
        }
        let args = if args.is_empty() {
            String::new()
        } else {
            format!("({})", args.join(", "))
        };

        format!(
            "query {{ Get {{ {}{} {{ {} }} }} }}",
            self.collection, args, fields
        )
    }
}

/// Fluent builder over a connection for one object query.
///
/// # Examples
///
/// ```no_run
/// use sprig::client::Client;
/// use sprig::filter::Filter;
///
/// let client = Client::connect_to_local()?;
/// let articles = client.collection("Article")?;
/// let rows = articles
///     .query()
///     .with_where(Filter::by_property("wordCount").greater_than(1000))
///     .with_limit(5)
///     .return_properties(["title", "url"])
///     .fetch_objects()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct QueryBuilder<'a, C: Connection> {
    conn: &'a C,
    spec: QuerySpec,
}

impl<'a, C: Connection> QueryBuilder<'a, C> {
    pub fn new(conn: &'a C, collection: impl Into<String>) -> Self {
        QueryBuilder {
            conn,
            spec: QuerySpec::new(collection),
        }
    }

    /// Wraps an already-assembled spec.
    pub fn from_spec(conn: &'a C, spec: QuerySpec) -> Self {
        QueryBuilder { conn, spec }
    }

    /// Sets the root filter expression.
    pub fn with_where(mut self, filter: FilterExpr) -> Self {
        self.spec.where_filter = Some(filter);
        self
    }

    /// Caps the number of returned rows.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.spec.limit = Some(limit);
        self
    }

    /// Scopes the query to a tenant via the in-document argument.
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.spec.tenant = Some(tenant.into());
        self
    }

    /// Replaces the requested property list.
    pub fn return_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.return_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one reference expansion. Repeated calls accumulate in order.
    pub fn return_reference<I, S>(mut self, relation: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.return_references.push((
            relation.into(),
            properties.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Sets the field list used when no properties are requested.
    pub fn set_default_fields(mut self, fields: impl Into<String>) -> Self {
        self.spec.default_fields = fields.into();
        self
    }

    /// The spec as configured so far.
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Compiles the document, posts it, and decodes the rows.
    ///
    /// One round trip per call. A missing result path in the envelope is an
    /// empty row list, not an error; protocol errors surface as
    /// [`QueryError::GraphQL`].
    pub fn fetch_objects(&self) -> Result<Vec<serde_json::Value>, QueryError> {
        let document = self.spec.to_graphql();
        tracing::debug!(collection = %self.spec.collection, "executing Get query");
        let envelope = self.conn.post("/v1/graphql", &json!({ "query": document }))?;
        response::parse_get(envelope, &self.spec.collection)
    }
}
