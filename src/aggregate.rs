//! Aggregation query compilation and execution.
//!
//! Mirrors the object query pipeline for the `Aggregate` grammar: an
//! [`AggregateSpec`] compiles to a document with one `meta` block per
//! requested metric, and [`AggregateBuilder::execute`] performs the round
//! trip. Aggregation decoding is strict: an envelope without the expected
//! result shape is a hard error, never an empty result.

use serde_json::json;

use crate::connection::Connection;
use crate::graphql;
use crate::response::{self, QueryError};

/// The complete specification of one aggregation query.
#[derive(Debug, Clone, Default)]
pub struct AggregateSpec {
    /// Collection to aggregate over
    pub collection: String,

    /// Metrics to compute; empty compiles as `count`
    pub metrics: Vec<String>,

    /// Property to group by
    pub group_by: Option<String>,

    /// Tenant carried as an in-document argument
    pub tenant: Option<String>,
}

impl AggregateSpec {
    pub fn new(collection: impl Into<String>) -> Self {
        AggregateSpec {
            collection: collection.into(),
            ..AggregateSpec::default()
        }
    }

    /// Compiles the spec into a GraphQL `Aggregate` document.
    ///
    /// Arguments appear in the fixed order `groupedBy`, `tenant`. Each
    /// metric gets its own `meta { ... }` block, in list order; metrics are
    /// never folded into one block.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::aggregate::AggregateSpec;
    ///
    /// let spec = AggregateSpec::new("Article");
    /// assert_eq!(
    ///     spec.to_graphql(),
    ///     "query { Aggregate { Article { meta { count } } } }"
    /// );
    /// ```
    pub fn to_graphql(&self) -> String {
        let blocks: Vec<String> = if self.metrics.is_empty() {
            vec!["meta { count }".to_string()]
        } else {
            self.metrics
                .iter()
                .map(|metric| format!("meta {{ {} }}", metric))
                .collect()
        };

        let mut args = Vec::new();
        if let Some(property) = &self.group_by {
            args.push(format!("groupedBy: {}", graphql::string_literal(property)));
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
            "query {{ Aggregate {{ {}{} {{ {} }} }} }}",
            self.collection,
            args,
            blocks.join(" ")
        )
    }
}

/// Fluent builder over a connection for one aggregation.
pub struct AggregateBuilder<'a, C: Connection> {
    conn: &'a C,
    spec: AggregateSpec,
}

impl<'a, C: Connection> AggregateBuilder<'a, C> {
    pub fn new(conn: &'a C, collection: impl Into<String>) -> Self {
        AggregateBuilder {
            conn,
            spec: AggregateSpec::new(collection),
        }
    }

    /// Wraps an already-assembled spec.
    pub fn from_spec(conn: &'a C, spec: AggregateSpec) -> Self {
        AggregateBuilder { conn, spec }
    }

    /// Replaces the metric list.
    pub fn metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    /// Groups results by the given property.
    pub fn group_by(mut self, property: impl Into<String>) -> Self {
        self.spec.group_by = Some(property.into());
        self
    }

    /// Scopes the aggregation to a tenant via the in-document argument.
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.spec.tenant = Some(tenant.into());
        self
    }

    /// The spec as configured so far.
    pub fn spec(&self) -> &AggregateSpec {
        &self.spec
    }

    /// Compiles the document, posts it, and decodes the aggregation rows.
    pub fn execute(&self) -> Result<Vec<serde_json::Value>, QueryError> {
        let document = self.spec.to_graphql();
        tracing::debug!(collection = %self.spec.collection, "executing Aggregate query");
        let envelope = self.conn.post("/v1/graphql", &json!({ "query": document }))?;
        response::parse_aggregate(envelope, &self.spec.collection)
    }
}
