use chrono::{TimeZone, Utc};
use sprig::filter::Filter;
use sprig::graphql::{filter_literal, string_literal};

// ============================================================================
// Leaf Literals
// ============================================================================

#[test]
fn test_text_leaf_literal() {
    let expr = Filter::by_property("status").equal("active");
    assert_eq!(
        filter_literal(&expr),
        r#"{path: ["status"], operator: Equal, valueText: "active"}"#
    );
}

#[test]
fn test_operator_renders_as_bare_tag() {
    let expr = Filter::by_property("wordCount").greater_than(1000);
    let literal = filter_literal(&expr);
    assert!(literal.contains("operator: GreaterThan"));
    assert!(!literal.contains("\"GreaterThan\""));
}

#[test]
fn test_int_and_number_literals() {
    assert_eq!(
        filter_literal(&Filter::by_property("views").less_than(10)),
        r#"{path: ["views"], operator: LessThan, valueInt: 10}"#
    );
    assert_eq!(
        filter_literal(&Filter::by_property("rating").greater_than(4.5)),
        r#"{path: ["rating"], operator: GreaterThan, valueNumber: 4.5}"#
    );
}

#[test]
fn test_boolean_literal_is_bare() {
    assert_eq!(
        filter_literal(&Filter::by_property("draft").equal(true)),
        r#"{path: ["draft"], operator: Equal, valueBoolean: true}"#
    );
    assert_eq!(
        filter_literal(&Filter::by_property("gone").is_null(false)),
        r#"{path: ["gone"], operator: IsNull, valueBoolean: false}"#
    );
}

#[test]
fn test_date_literal_is_quoted_rfc3339() {
    let instant = Utc.with_ymd_and_hms(2023, 5, 17, 12, 30, 0).unwrap();
    let expr = Filter::by_property("publishedAt").greater_than(instant);
    assert_eq!(
        filter_literal(&expr),
        r#"{path: ["publishedAt"], operator: GreaterThan, valueDate: "2023-05-17T12:30:00Z"}"#
    );
}

#[test]
fn test_text_list_literal() {
    let expr = Filter::by_property("tag").contains_any(["a", "b", "a"]);
    assert_eq!(
        filter_literal(&expr),
        r#"{path: ["tag"], operator: ContainsAny, valueText: ["a", "b", "a"]}"#
    );
}

// ============================================================================
// Reference and Composite Literals
// ============================================================================

#[test]
fn test_reference_literal_nests_value_object() {
    let expr = Filter::by_ref("hasCategory").by_property("title").like("*Tech*");
    assert_eq!(
        filter_literal(&expr),
        r#"{path: ["hasCategory"], operator: Equal, valueObject: {path: ["title"], operator: Like, valueText: "*Tech*"}}"#
    );
}

#[test]
fn test_composite_literal_brackets_operands() {
    let expr = Filter::any_of(vec![
        Filter::by_property("a").equal(1),
        Filter::by_property("b").equal(2),
    ]);
    assert_eq!(
        filter_literal(&expr),
        r#"{operator: Or, operands: [{path: ["a"], operator: Equal, valueInt: 1}, {path: ["b"], operator: Equal, valueInt: 2}]}"#
    );
}

#[test]
fn test_nested_composites_serialize_recursively() {
    let expr = Filter::all_of(vec![
        Filter::any_of(vec![Filter::by_property("x").equal(1)]),
        Filter::by_property("y").equal(2),
    ]);
    assert_eq!(
        filter_literal(&expr),
        r#"{operator: And, operands: [{operator: Or, operands: [{path: ["x"], operator: Equal, valueInt: 1}]}, {path: ["y"], operator: Equal, valueInt: 2}]}"#
    );
}

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn test_quotes_escaped_inside_literals() {
    let expr = Filter::by_property("title").equal(r#"say "hi""#);
    assert_eq!(
        filter_literal(&expr),
        "{path: [\"title\"], operator: Equal, valueText: \"say \\\"hi\\\"\"}"
    );
}

#[test]
fn test_backslashes_and_newlines_escaped() {
    let expr = Filter::by_property("body").like("a\\b\nc");
    assert_eq!(
        filter_literal(&expr),
        "{path: [\"body\"], operator: Like, valueText: \"a\\\\b\\nc\"}"
    );
}

#[test]
fn test_escaping_applies_at_depth() {
    let expr = Filter::all_of(vec![
        Filter::by_ref("has\"Rel").by_property("ti\tle").equal("v\nal"),
    ]);
    assert_eq!(
        filter_literal(&expr),
        "{operator: And, operands: [{path: [\"has\\\"Rel\"], operator: Equal, valueObject: {path: [\"ti\\tle\"], operator: Equal, valueText: \"v\\nal\"}}]}"
    );
}

#[test]
fn test_string_literal_quotes_plain_text() {
    assert_eq!(string_literal("acme"), "\"acme\"");
    assert_eq!(string_literal("weiß"), "\"weiß\"");
}
