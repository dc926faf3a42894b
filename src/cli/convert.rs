//! JSON <-> typed spec conversion utilities

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::CliError;
use crate::aggregate::AggregateSpec;
use crate::filter::{Comparison, FilterExpr, FilterValue, Operator};
use crate::query::QuerySpec;

fn bad(msg: impl Into<String>) -> CliError {
    CliError::BadSpec(msg.into())
}

/// Convert a node record into a filter expression
///
/// Records with an `operands` key decode as composites, records with a
/// `valueObject` key as references, and everything else as a leaf
/// comparison.
pub fn json_to_filter(record: &Value) -> Result<FilterExpr, CliError> {
    let map = record
        .as_object()
        .ok_or_else(|| bad("filter node must be an object"))?;

    if let Some(operands) = map.get("operands") {
        let operator = operator_tag(map)?;
        if !matches!(operator, Operator::And | Operator::Or) {
            return Err(bad(format!("operator {} cannot carry operands", operator)));
        }
        let entries = operands
            .as_array()
            .ok_or_else(|| bad("operands must be a list"))?;
        let operands = entries
            .iter()
            .map(json_to_filter)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(FilterExpr::Composite { operator, operands });
    }

    if let Some(target) = map.get("valueObject") {
        let relation = path_head(map)?;
        let inner = match target.as_object() {
            Some(m) if m.is_empty() => None,
            _ => Some(json_to_comparison(target)?),
        };
        return Ok(FilterExpr::Reference { relation, inner });
    }

    Ok(FilterExpr::Comparison(json_to_comparison(record)?))
}

/// Convert a filter expression into its node record
pub fn filter_to_json(expr: &FilterExpr) -> Value {
    expr.to_json()
}

fn json_to_comparison(record: &Value) -> Result<Comparison, CliError> {
    let map = record
        .as_object()
        .ok_or_else(|| bad("comparison must be an object"))?;
    let field = path_head(map)?;
    let operator = operator_tag(map)?;
    let value = decode_value(map)?;
    Ok(Comparison::new(field, operator, value))
}

fn path_head(map: &serde_json::Map<String, Value>) -> Result<String, CliError> {
    map.get("path")
        .and_then(Value::as_array)
        .and_then(|segments| segments.first())
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| bad("path must be a non-empty list of strings"))
}

fn operator_tag(map: &serde_json::Map<String, Value>) -> Result<Operator, CliError> {
    let tag = map
        .get("operator")
        .and_then(Value::as_str)
        .ok_or_else(|| bad("missing operator"))?;
    Operator::from_tag(tag).ok_or_else(|| bad(format!("unknown operator '{}'", tag)))
}

// Value keys are tried in the fixed precedence: text, then integer, then
// float, then boolean, then date.
fn decode_value(map: &serde_json::Map<String, Value>) -> Result<FilterValue, CliError> {
    if let Some(v) = map.get("valueText") {
        return match v {
            Value::String(s) => Ok(FilterValue::Text(s.clone())),
            Value::Array(items) => {
                let texts = items
                    .iter()
                    .map(|item| item.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| bad("valueText list entries must be strings"))?;
                Ok(FilterValue::TextList(texts))
            }
            _ => Err(bad("valueText must be a string or a list of strings")),
        };
    }
    if let Some(v) = map.get("valueInt") {
        return v
            .as_i64()
            .map(FilterValue::Int)
            .ok_or_else(|| bad("valueInt must be an integer"));
    }
    if let Some(v) = map.get("valueNumber") {
        return v
            .as_f64()
            .map(FilterValue::Number)
            .ok_or_else(|| bad("valueNumber must be a number"));
    }
    if let Some(v) = map.get("valueBoolean") {
        return v
            .as_bool()
            .map(FilterValue::Boolean)
            .ok_or_else(|| bad("valueBoolean must be a boolean"));
    }
    if let Some(v) = map.get("valueDate") {
        let text = v.as_str().ok_or_else(|| bad("valueDate must be a string"))?;
        let instant = DateTime::parse_from_rfc3339(text)
            .map_err(|e| bad(format!("valueDate '{}' is not RFC 3339: {}", text, e)))?;
        return Ok(FilterValue::Date(instant.with_timezone(&Utc)));
    }
    Err(bad("comparison carries no value key"))
}

/// Convert a query spec document into a [`QuerySpec`]
pub fn json_to_query_spec(document: &Value) -> Result<QuerySpec, CliError> {
    let map = document
        .as_object()
        .ok_or_else(|| bad("query spec must be an object"))?;
    let collection = map
        .get("collection")
        .and_then(Value::as_str)
        .ok_or_else(|| bad("missing collection"))?;

    let mut spec = QuerySpec::new(collection);
    if let Some(record) = map.get("where") {
        spec.where_filter = Some(json_to_filter(record)?);
    }
    if let Some(limit) = map.get("limit") {
        spec.limit = Some(
            limit
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| bad("limit must be a non-negative integer"))?,
        );
    }
    if let Some(properties) = map.get("returnProperties") {
        spec.return_properties = string_list(properties, "returnProperties")?;
    }
    if let Some(references) = map.get("returnReferences") {
        let entries = references
            .as_array()
            .ok_or_else(|| bad("returnReferences must be a list"))?;
        for entry in entries {
            let relation = entry
                .get("relation")
                .and_then(Value::as_str)
                .ok_or_else(|| bad("reference entries need a relation"))?;
            let properties = entry
                .get("properties")
                .map(|p| string_list(p, "properties"))
                .transpose()?
                .unwrap_or_default();
            spec.return_references.push((relation.to_string(), properties));
        }
    }
    if let Some(fields) = map.get("defaultFields").and_then(Value::as_str) {
        spec.default_fields = fields.to_string();
    }
    if let Some(tenant) = map.get("tenant").and_then(Value::as_str) {
        spec.tenant = Some(tenant.to_string());
    }
    Ok(spec)
}

/// Convert an aggregation spec document into an [`AggregateSpec`]
pub fn json_to_aggregate_spec(document: &Value) -> Result<AggregateSpec, CliError> {
    let map = document
        .as_object()
        .ok_or_else(|| bad("aggregation spec must be an object"))?;
    let collection = map
        .get("collection")
        .and_then(Value::as_str)
        .ok_or_else(|| bad("missing collection"))?;

    let mut spec = AggregateSpec::new(collection);
    if let Some(metrics) = map.get("metrics") {
        spec.metrics = string_list(metrics, "metrics")?;
    }
    if let Some(property) = map.get("groupBy").and_then(Value::as_str) {
        spec.group_by = Some(property.to_string());
    }
    if let Some(tenant) = map.get("tenant").and_then(Value::as_str) {
        spec.tenant = Some(tenant.to_string());
    }
    Ok(spec)
}

fn string_list(value: &Value, what: &str) -> Result<Vec<String>, CliError> {
    value
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| bad(format!("{} must be a list of strings", what)))
}
