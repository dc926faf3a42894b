use std::cell::RefCell;

use serde_json::{Value, json};
use sprig::aggregate::{AggregateBuilder, AggregateSpec};
use sprig::connection::{Connection, ConnectionError};
use sprig::response::QueryError;

// Connection double that records every POST and answers with a fixed reply.
struct MockConnection {
    posts: RefCell<Vec<(String, Value)>>,
    reply: Value,
}

impl MockConnection {
    fn replying(reply: Value) -> Self {
        MockConnection {
            posts: RefCell::new(Vec::new()),
            reply,
        }
    }

    fn last_document(&self) -> String {
        let posts = self.posts.borrow();
        let (_, body) = posts.last().expect("no request captured");
        body["query"]
            .as_str()
            .expect("body carries no query")
            .to_string()
    }
}

impl Connection for MockConnection {
    fn post(&self, path: &str, body: &Value) -> Result<Value, ConnectionError> {
        self.posts.borrow_mut().push((path.to_string(), body.clone()));
        Ok(self.reply.clone())
    }

    fn get(&self, _path: &str) -> Result<Value, ConnectionError> {
        unimplemented!("aggregations only POST")
    }

    fn put(&self, _path: &str, _body: &Value) -> Result<Value, ConnectionError> {
        unimplemented!("aggregations only POST")
    }

    fn patch(&self, _path: &str, _body: &Value) -> Result<Value, ConnectionError> {
        unimplemented!("aggregations only POST")
    }

    fn delete(&self, _path: &str, _body: Option<&Value>) -> Result<(), ConnectionError> {
        unimplemented!("aggregations only POST")
    }

    fn head(&self, _path: &str) -> Result<bool, ConnectionError> {
        unimplemented!("aggregations only POST")
    }
}

fn counted() -> Value {
    json!({"data": {"Aggregate": {"Article": [{"meta": {"count": 42}}]}}})
}

// ============================================================================
// Document Compilation
// ============================================================================

#[test]
fn test_empty_metrics_compile_as_count() {
    let spec = AggregateSpec::new("Article");
    assert_eq!(
        spec.to_graphql(),
        "query { Aggregate { Article { meta { count } } } }"
    );
}

#[test]
fn test_each_metric_gets_its_own_meta_block() {
    let mut spec = AggregateSpec::new("Article");
    spec.metrics = vec!["count".to_string(), "sum".to_string()];
    assert_eq!(
        spec.to_graphql(),
        "query { Aggregate { Article { meta { count } meta { sum } } } }"
    );
}

#[test]
fn test_grouped_by_comes_before_tenant() {
    let conn = MockConnection::replying(counted());
    let builder = AggregateBuilder::new(&conn, "Article")
        .with_tenant("acme")
        .group_by("category");
    builder.execute().unwrap();

    assert_eq!(
        conn.last_document(),
        "query { Aggregate { Article(groupedBy: \"category\", tenant: \"acme\") { meta { count } } } }"
    );
}

#[test]
fn test_tenant_alone_still_parenthesized() {
    let mut spec = AggregateSpec::new("Article");
    spec.tenant = Some("acme".to_string());
    assert_eq!(
        spec.to_graphql(),
        "query { Aggregate { Article(tenant: \"acme\") { meta { count } } } }"
    );
}

// ============================================================================
// Execution and Decoding
// ============================================================================

#[test]
fn test_rows_are_decoded() {
    let conn = MockConnection::replying(counted());
    let rows = AggregateBuilder::new(&conn, "Article").execute().unwrap();
    assert_eq!(rows, vec![json!({"meta": {"count": 42}})]);
}

#[test]
fn test_missing_collection_section_is_shape_failure() {
    let conn = MockConnection::replying(json!({"data": {"Aggregate": {}}}));
    let err = AggregateBuilder::new(&conn, "Article").execute().unwrap_err();
    assert!(matches!(err, QueryError::InvalidResponse(_)));
    assert_eq!(err.to_string(), "Invalid aggregation response format");
}

#[test]
fn test_empty_envelope_is_shape_failure() {
    let conn = MockConnection::replying(json!({}));
    let err = AggregateBuilder::new(&conn, "Article").execute().unwrap_err();
    assert_eq!(err.to_string(), "Invalid aggregation response format");
}

#[test]
fn test_protocol_errors_use_aggregation_prefix() {
    let conn = MockConnection::replying(json!({
        "errors": [{"message": "no such property"}, {}]
    }));
    let err = AggregateBuilder::new(&conn, "Article").execute().unwrap_err();
    assert_eq!(
        err.to_string(),
        "GraphQL aggregation query failed: no such property, Unknown error"
    );
}

#[test]
fn test_errors_win_over_missing_shape() {
    // An envelope can both report errors and lack the data section; the
    // protocol error is the one to surface.
    let conn = MockConnection::replying(json!({"errors": [{"message": "denied"}]}));
    let err = AggregateBuilder::new(&conn, "Article").execute().unwrap_err();
    assert!(matches!(err, QueryError::GraphQL { .. }));
}

// ============================================================================
// Spec Document Decoding (CLI)
// ============================================================================

#[cfg(feature = "cli")]
mod spec_documents {
    use super::*;
    use sprig::cli::json_to_aggregate_spec;

    #[test]
    fn test_full_aggregation_document_compiles() {
        let document = json!({
            "collection": "Article",
            "metrics": ["count"],
            "groupBy": "category",
            "tenant": "acme"
        });
        let spec = json_to_aggregate_spec(&document).unwrap();
        assert_eq!(
            spec.to_graphql(),
            "query { Aggregate { Article(groupedBy: \"category\", tenant: \"acme\") { meta { count } } } }"
        );
    }

    #[test]
    fn test_metrics_default_when_omitted() {
        let spec = json_to_aggregate_spec(&json!({"collection": "Article"})).unwrap();
        assert_eq!(
            spec.to_graphql(),
            "query { Aggregate { Article { meta { count } } } }"
        );
    }
}
