use crate::filter::operators::Operator;
use crate::filter::value::FilterValue;

/// A single comparison against one property or the object ID.
///
/// The leaf of every filter tree: one field, one operator, one typed
/// literal. ID comparisons use the fixed field name `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Property name, or `id` for ID comparisons
    pub field: String,

    /// Comparison operator
    pub operator: Operator,

    /// Typed literal to compare against
    pub value: FilterValue,
}

impl Comparison {
    pub fn new(field: impl Into<String>, operator: Operator, value: FilterValue) -> Self {
        Comparison {
            field: field.into(),
            operator,
            value,
        }
    }

    /// The node record for this comparison.
    ///
    /// Exactly three keys: `path` (a single-segment list), `operator` (the
    /// wire tag) and the value key chosen by the literal's type.
    pub fn to_json(&self) -> serde_json::Value {
        let mut record = serde_json::Map::new();
        record.insert(
            "path".to_string(),
            serde_json::Value::Array(vec![serde_json::Value::String(self.field.clone())]),
        );
        record.insert(
            "operator".to_string(),
            serde_json::Value::String(self.operator.as_str().to_string()),
        );
        record.insert(self.value.key().to_string(), self.value.to_json());
        serde_json::Value::Object(record)
    }
}

/// A boolean filter tree over properties, IDs and references.
///
/// Expressions are immutable values produced by the [builder] entry points;
/// they nest to arbitrary depth and serialize to node records via
/// [`FilterExpr::to_json`] or to GraphQL literals via
/// [`crate::graphql::filter_literal`].
///
/// [builder]: crate::filter::builder
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Leaf comparison
    Comparison(Comparison),

    /// Comparison carried across a reference property
    ///
    /// The outer record always uses the `Equal` operator; the inner
    /// comparison (under `valueObject`) carries the real operator. With no
    /// inner comparison the record's `valueObject` is an empty object.
    Reference {
        relation: String,
        inner: Option<Comparison>,
    },

    /// `And`/`Or` over sub-filters
    ///
    /// `operands` keeps caller order. A single-element composite stays
    /// wrapped; it is never collapsed into its operand.
    Composite {
        operator: Operator,
        operands: Vec<FilterExpr>,
    },
}

impl FilterExpr {
    /// The node record for this expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::filter::Filter;
    /// use serde_json::json;
    ///
    /// let expr = Filter::by_property("status").equal("active");
    /// assert_eq!(
    ///     expr.to_json(),
    ///     json!({"path": ["status"], "operator": "Equal", "valueText": "active"}),
    /// );
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FilterExpr::Comparison(c) => c.to_json(),
            FilterExpr::Reference { relation, inner } => {
                let mut record = serde_json::Map::new();
                record.insert(
                    "path".to_string(),
                    serde_json::Value::Array(vec![serde_json::Value::String(relation.clone())]),
                );
                record.insert(
                    "operator".to_string(),
                    serde_json::Value::String(Operator::Equal.as_str().to_string()),
                );
                record.insert(
                    "valueObject".to_string(),
                    inner
                        .as_ref()
                        .map(Comparison::to_json)
                        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
                );
                serde_json::Value::Object(record)
            }
            FilterExpr::Composite { operator, operands } => {
                let mut record = serde_json::Map::new();
                record.insert(
                    "operator".to_string(),
                    serde_json::Value::String(operator.as_str().to_string()),
                );
                record.insert(
                    "operands".to_string(),
                    serde_json::Value::Array(operands.iter().map(FilterExpr::to_json).collect()),
                );
                serde_json::Value::Object(record)
            }
        }
    }
}
