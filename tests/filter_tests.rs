use chrono::{TimeZone, Utc};
use serde_json::json;
use sprig::filter::{Filter, FilterExpr, FilterValue, Operator};

fn status_is_active() -> FilterExpr {
    Filter::by_property("status").equal("active")
}

fn long_read() -> FilterExpr {
    Filter::by_property("wordCount").greater_than(1000)
}

// ============================================================================
// Leaf Records
// ============================================================================

#[test]
fn test_property_equal_text_record() {
    assert_eq!(
        status_is_active().to_json(),
        json!({"path": ["status"], "operator": "Equal", "valueText": "active"})
    );
}

#[test]
fn test_leaf_records_carry_exactly_three_keys() {
    let record = status_is_active().to_json();
    assert_eq!(record.as_object().unwrap().len(), 3);

    let record = Filter::by_id().equal("abc").to_json();
    assert_eq!(record.as_object().unwrap().len(), 3);
}

#[test]
fn test_integer_dispatches_to_value_int() {
    assert_eq!(
        long_read().to_json(),
        json!({"path": ["wordCount"], "operator": "GreaterThan", "valueInt": 1000})
    );
}

#[test]
fn test_float_dispatches_to_value_number() {
    let expr = Filter::by_property("rating").less_than(4.5);
    assert_eq!(
        expr.to_json(),
        json!({"path": ["rating"], "operator": "LessThan", "valueNumber": 4.5})
    );
}

#[test]
fn test_boolean_dispatches_to_value_boolean() {
    let expr = Filter::by_property("draft").equal(false);
    assert_eq!(
        expr.to_json(),
        json!({"path": ["draft"], "operator": "Equal", "valueBoolean": false})
    );
}

#[test]
fn test_date_dispatches_to_value_date() {
    let instant = Utc.with_ymd_and_hms(2023, 5, 17, 12, 30, 0).unwrap();
    let expr = Filter::by_property("publishedAt").greater_than(instant);
    assert_eq!(
        expr.to_json(),
        json!({
            "path": ["publishedAt"],
            "operator": "GreaterThan",
            "valueDate": "2023-05-17T12:30:00Z"
        })
    );
}

#[test]
fn test_is_null_dispatches_to_value_boolean() {
    let expr = Filter::by_property("deletedAt").is_null(true);
    assert_eq!(
        expr.to_json(),
        json!({"path": ["deletedAt"], "operator": "IsNull", "valueBoolean": true})
    );
}

#[test]
fn test_like_is_always_text() {
    let expr = Filter::by_property("title").like("*rust*");
    assert_eq!(
        expr.to_json(),
        json!({"path": ["title"], "operator": "Like", "valueText": "*rust*"})
    );
}

// ============================================================================
// ID Comparisons
// ============================================================================

#[test]
fn test_id_comparisons_use_fixed_field() {
    let expr = Filter::by_id().equal("00000000-0000-0000-0000-00000000beef");
    assert_eq!(
        expr.to_json(),
        json!({
            "path": ["id"],
            "operator": "Equal",
            "valueText": "00000000-0000-0000-0000-00000000beef"
        })
    );

    let expr = Filter::by_id().contains_any(["a", "b"]);
    assert_eq!(
        expr.to_json(),
        json!({"path": ["id"], "operator": "ContainsAny", "valueText": ["a", "b"]})
    );
}

// ============================================================================
// Reference Records
// ============================================================================

#[test]
fn test_reference_wraps_inner_comparison() {
    let expr = Filter::by_ref("hasCategory").by_property("title").like("*Tech*");
    assert_eq!(
        expr.to_json(),
        json!({
            "path": ["hasCategory"],
            "operator": "Equal",
            "valueObject": {"path": ["title"], "operator": "Like", "valueText": "*Tech*"}
        })
    );
}

#[test]
fn test_reference_outer_operator_is_always_equal() {
    let expr = Filter::by_ref("hasAuthor").by_property("age").greater_than(40);
    let record = expr.to_json();
    assert_eq!(record["operator"], "Equal");
    assert_eq!(record["valueObject"]["operator"], "GreaterThan");
}

#[test]
fn test_reference_by_id_targets_inner_id() {
    let expr = Filter::by_ref("hasAuthor").by_id().equal("abc");
    assert_eq!(
        expr.to_json(),
        json!({
            "path": ["hasAuthor"],
            "operator": "Equal",
            "valueObject": {"path": ["id"], "operator": "Equal", "valueText": "abc"}
        })
    );
}

#[test]
fn test_reference_without_target_is_empty_object() {
    let expr = FilterExpr::from(Filter::by_ref("hasCategory"));
    assert_eq!(
        expr.to_json(),
        json!({"path": ["hasCategory"], "operator": "Equal", "valueObject": {}})
    );
}

// ============================================================================
// Composites
// ============================================================================

#[test]
fn test_all_of_record_shape() {
    let expr = Filter::all_of(vec![status_is_active(), long_read()]);
    assert_eq!(
        expr.to_json(),
        json!({
            "operator": "And",
            "operands": [
                {"path": ["status"], "operator": "Equal", "valueText": "active"},
                {"path": ["wordCount"], "operator": "GreaterThan", "valueInt": 1000}
            ]
        })
    );
}

#[test]
fn test_any_of_record_shape() {
    let expr = Filter::any_of(vec![status_is_active(), long_read()]);
    let record = expr.to_json();
    assert_eq!(record["operator"], "Or");
    assert_eq!(record["operands"].as_array().unwrap().len(), 2);
}

#[test]
fn test_single_element_composite_stays_wrapped() {
    let expr = Filter::all_of(vec![status_is_active()]);
    assert_eq!(
        expr.to_json(),
        json!({
            "operator": "And",
            "operands": [{"path": ["status"], "operator": "Equal", "valueText": "active"}]
        })
    );
}

#[test]
fn test_operands_keep_caller_order() {
    let expr = Filter::any_of(vec![long_read(), status_is_active()]);
    let record = expr.to_json();
    assert_eq!(record["operands"][0]["path"], json!(["wordCount"]));
    assert_eq!(record["operands"][1]["path"], json!(["status"]));
}

#[test]
fn test_deep_nesting_is_preserved() {
    let mut expr = Filter::by_property("leaf").equal(1);
    for _ in 0..4 {
        expr = Filter::all_of(vec![expr]);
    }

    let record = expr.to_json();
    let mut node = &record;
    for _ in 0..4 {
        assert_eq!(node["operator"], "And");
        node = &node["operands"][0];
    }
    assert_eq!(node["path"], json!(["leaf"]));
}

#[test]
fn test_contains_any_preserves_order_and_duplicates() {
    let expr = Filter::by_property("tag").contains_any(["beta", "alpha", "beta"]);
    assert_eq!(
        expr.to_json(),
        json!({
            "path": ["tag"],
            "operator": "ContainsAny",
            "valueText": ["beta", "alpha", "beta"]
        })
    );
}

// ============================================================================
// Operator and Value Vocabulary
// ============================================================================

#[test]
fn test_operator_tags_round_trip() {
    let tags = [
        "Equal",
        "NotEqual",
        "Like",
        "IsNull",
        "GreaterThan",
        "LessThan",
        "ContainsAny",
        "And",
        "Or",
    ];
    for tag in tags {
        let operator = Operator::from_tag(tag).unwrap();
        assert_eq!(operator.as_str(), tag);
    }
    assert!(Operator::from_tag("Between").is_none());
}

#[test]
fn test_value_keys_follow_type() {
    assert_eq!(FilterValue::from("x").key(), "valueText");
    assert_eq!(FilterValue::from(1i64).key(), "valueInt");
    assert_eq!(FilterValue::from(1.5).key(), "valueNumber");
    assert_eq!(FilterValue::from(true).key(), "valueBoolean");
    assert_eq!(
        FilterValue::from(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()).key(),
        "valueDate"
    );
    assert_eq!(FilterValue::from(vec!["a", "b"]).key(), "valueText");
}

// ============================================================================
// Node Record Decoding (CLI)
// ============================================================================

#[cfg(feature = "cli")]
mod decoding {
    use super::*;
    use sprig::cli::{CliError, filter_to_json, json_to_filter};

    #[test]
    fn test_decode_reference_record() {
        let record = json!({
            "path": ["hasCategory"],
            "operator": "Equal",
            "valueObject": {"path": ["title"], "operator": "Like", "valueText": "*Tech*"}
        });
        let expr = json_to_filter(&record).unwrap();
        assert_eq!(
            expr,
            Filter::by_ref("hasCategory").by_property("title").like("*Tech*")
        );
    }

    #[test]
    fn test_decode_empty_value_object() {
        let record = json!({"path": ["hasCategory"], "operator": "Equal", "valueObject": {}});
        let expr = json_to_filter(&record).unwrap();
        assert_eq!(expr, FilterExpr::from(Filter::by_ref("hasCategory")));
    }

    #[test]
    fn test_deep_tree_round_trips() {
        let expr = Filter::any_of(vec![
            Filter::all_of(vec![
                status_is_active(),
                Filter::all_of(vec![Filter::all_of(vec![long_read()])]),
            ]),
            Filter::by_ref("hasCategory").by_property("title").like("*Tech*"),
        ]);

        let record = filter_to_json(&expr);
        let decoded = json_to_filter(&record).unwrap();
        assert_eq!(decoded, expr);
        assert_eq!(filter_to_json(&decoded), record);
    }

    #[test]
    fn test_text_wins_over_other_value_keys() {
        // Malformed records carrying several value keys resolve by the
        // fixed precedence, text first.
        let record = json!({
            "path": ["f"],
            "operator": "Equal",
            "valueText": "seven",
            "valueInt": 7
        });
        let expr = json_to_filter(&record).unwrap();
        assert_eq!(expr, Filter::by_property("f").equal("seven"));
    }

    #[test]
    fn test_decode_date_value() {
        let record = json!({
            "path": ["publishedAt"],
            "operator": "LessThan",
            "valueDate": "2023-05-17T12:30:00Z"
        });
        let expr = json_to_filter(&record).unwrap();
        let instant = Utc.with_ymd_and_hms(2023, 5, 17, 12, 30, 0).unwrap();
        assert_eq!(expr, Filter::by_property("publishedAt").less_than(instant));
    }

    #[test]
    fn test_decode_rejects_unknown_operator() {
        let record = json!({"path": ["f"], "operator": "Between", "valueInt": 7});
        assert!(matches!(
            json_to_filter(&record),
            Err(CliError::BadSpec(_))
        ));
    }

    #[test]
    fn test_decode_rejects_missing_value_key() {
        let record = json!({"path": ["f"], "operator": "Equal"});
        assert!(matches!(
            json_to_filter(&record),
            Err(CliError::BadSpec(_))
        ));
    }

    #[test]
    fn test_decode_rejects_composite_with_comparison_operator() {
        let record = json!({"operator": "Equal", "operands": []});
        assert!(matches!(
            json_to_filter(&record),
            Err(CliError::BadSpec(_))
        ));
    }
}
