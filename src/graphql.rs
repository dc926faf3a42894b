//! GraphQL literal serialization for filter expressions.
//!
//! This module renders filter trees as GraphQL input-object literals, the
//! form the `where` argument takes inside a compiled query document. Output
//! is deterministic: key order is fixed per node shape and operands keep
//! caller order.
//!
//! # Features
//!
//! - **Closed shapes** via [`filter_literal()`] - every node renders from its
//!   typed variant, never from key inspection
//! - **Bare operator tags** - `operator` is a GraphQL enum in the target
//!   grammar, so tags render unquoted
//! - **String escaping** - handles quotes, backslashes, control codes, and
//!   Unicode at any nesting depth
//! - **Unbounded nesting** - composites recurse with no depth limit
//!
//! # Examples
//!
//! ```
//! use sprig::filter::Filter;
//! use sprig::graphql::filter_literal;
//!
//! let expr = Filter::by_property("status").equal("active");
//!
//! assert_eq!(
//!     filter_literal(&expr),
//!     r#"{path: ["status"], operator: Equal, valueText: "active"}"#
//! );
//! ```

use crate::filter::expression::{Comparison, FilterExpr};
use crate::filter::operators::Operator;
use crate::filter::value::{FilterValue, rfc3339};

/// Renders a filter expression as a GraphQL input-object literal.
///
/// Leaf records render as `{path: [...], operator: Tag, valueX: literal}`,
/// references nest their inner comparison under `valueObject` (an empty
/// `{}` when no target was picked), and composites render their operands as
/// a bracketed list in caller order.
pub fn filter_literal(expr: &FilterExpr) -> String {
    match expr {
        FilterExpr::Comparison(c) => comparison_literal(c),
        FilterExpr::Reference { relation, inner } => {
            let target = match inner {
                Some(c) => comparison_literal(c),
                None => "{}".to_string(),
            };
            format!(
                "{{path: [{}], operator: {}, valueObject: {}}}",
                string_literal(relation),
                Operator::Equal.as_str(),
                target
            )
        }
        FilterExpr::Composite { operator, operands } => {
            let items: Vec<String> = operands.iter().map(filter_literal).collect();
            format!(
                "{{operator: {}, operands: [{}]}}",
                operator.as_str(),
                items.join(", ")
            )
        }
    }
}

fn comparison_literal(c: &Comparison) -> String {
    format!(
        "{{path: [{}], operator: {}, {}: {}}}",
        string_literal(&c.field),
        c.operator.as_str(),
        c.value.key(),
        value_literal(&c.value)
    )
}

fn value_literal(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(s) => string_literal(s),
        FilterValue::Int(n) => n.to_string(),
        FilterValue::Number(n) => n.to_string(),
        FilterValue::Boolean(b) => b.to_string(),
        FilterValue::Date(d) => string_literal(&rfc3339(d)),
        FilterValue::TextList(items) => {
            let quoted: Vec<String> = items.iter().map(|s| string_literal(s)).collect();
            format!("[{}]", quoted.join(", "))
        }
    }
}

/// Renders a string as a double-quoted GraphQL literal with escaping.
pub fn string_literal(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}

fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            c if c.is_control() => {
                // Unicode escape for control chars
                format!("\\u{:04x}", c as u32).chars().collect()
            }
            c => vec![c],
        })
        .collect()
}

#[test]
fn test_escape_quotes_and_backslashes() {
    assert_eq!(string_literal(r#"say "hi""#), r#""say \"hi\"""#);
    assert_eq!(string_literal(r"a\b"), r#""a\\b""#);
}

#[test]
fn test_escape_control_characters() {
    assert_eq!(string_literal("line1\nline2"), "\"line1\\nline2\"");
    assert_eq!(string_literal("tab\there"), "\"tab\\there\"");
    assert_eq!(string_literal("\u{0007}"), "\"\\u0007\"");
}

#[test]
fn test_non_ascii_passes_through() {
    assert_eq!(string_literal("über café"), "\"über café\"");
}

#[test]
fn test_reference_without_target() {
    use crate::filter::Filter;

    let expr = FilterExpr::from(Filter::by_ref("hasAuthor"));
    assert_eq!(
        filter_literal(&expr),
        r#"{path: ["hasAuthor"], operator: Equal, valueObject: {}}"#
    );
}

#[test]
fn test_composite_operands_keep_order() {
    use crate::filter::Filter;

    let expr = Filter::all_of(vec![
        Filter::by_property("a").equal(1),
        Filter::by_property("b").equal(2),
    ]);
    assert_eq!(
        filter_literal(&expr),
        "{operator: And, operands: [\
         {path: [\"a\"], operator: Equal, valueInt: 1}, \
         {path: [\"b\"], operator: Equal, valueInt: 2}]}"
    );
}
