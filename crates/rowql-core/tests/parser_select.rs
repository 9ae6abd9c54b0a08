//! Tests for the selection: wildcards, value lists, DISTINCT,
//! function projections and aggregations.

mod common;
use common::*;

use rowql_core::ast::{Aggregation, DataSet, FunctionResult, Projection, Value};

#[test]
fn select_all_from_table() {
    let q = parse("SELECT * FROM t");
    assert_eq!(q.projection, Projection::All);
    assert_eq!(q.aggregation, Aggregation::None);
    assert_eq!(q.dataset, DataSet::table("t"));
    assert!(q.joins.is_empty());
    assert!(q.condition.is_none());
    assert!(q.ordering.is_none());
    assert!(q.limit_and_offset.is_none());
    round_trip("SELECT * FROM t");
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(parse("select * from t"), parse("SELECT * FROM t"));
    assert_eq!(parse("SeLeCt * FrOm t"), parse("SELECT * FROM t"));
}

#[test]
fn identifiers_keep_their_case() {
    let q = parse("SELECT Name FROM Users");
    assert_eq!(
        q.projection,
        Projection::Selected {
            values: vec![Value::field("Name")]
        }
    );
    assert_eq!(q.dataset, DataSet::table("Users"));
}

#[test]
fn select_field_list() {
    let q = parse("SELECT id, users.name, age FROM users");
    assert_eq!(
        q.projection,
        Projection::Selected {
            values: vec![
                Value::field("id"),
                Value::field("users.name"),
                Value::field("age"),
            ]
        }
    );
    round_trip("SELECT id, users.name, age FROM users");
}

#[test]
fn select_distinct() {
    let q = parse("SELECT DISTINCT city, country FROM people");
    assert_eq!(
        q.projection,
        Projection::Distinct {
            values: vec![Value::field("city"), Value::field("country")]
        }
    );
    round_trip("SELECT distinct city, country FROM people");
}

#[test]
fn select_literals_and_expressions() {
    let q = parse("SELECT 1, 'two', true, price * 2 FROM t");
    let values = q.projection.values().unwrap();
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], Value::number(1.0));
    assert_eq!(values[1], Value::string("two"));
    assert_eq!(values[2], Value::boolean(true));
    assert!(matches!(values[3], Value::Expression(_)));
    round_trip("SELECT 1, 'two', true, price * 2 FROM t");
}

#[test]
fn select_single_function() {
    let q = parse("SELECT UPPER(name) FROM users");
    assert_eq!(
        q.projection,
        Projection::Function {
            function: FunctionResult::new("UPPER", vec![Value::field("name")])
        }
    );
    round_trip("SELECT UPPER(name) FROM users");
}

#[test]
fn leading_function_is_the_whole_projection() {
    assert_eq!(error_message("SELECT UPPER(a), b FROM t"), "Expected 'FROM'");
    assert_eq!(error_message("SELECT f(a) + 1 FROM t"), "Expected 'FROM'");
}

#[test]
fn select_function_among_fields() {
    let q = parse("SELECT id, LOWER(name) FROM users");
    assert!(matches!(
        q.projection.values(),
        Some([Value::Field(_), Value::FunctionResult(_)])
    ));
}

#[test]
fn count_wildcard() {
    let q = parse("SELECT COUNT(*) FROM t");
    assert_eq!(q.aggregation, Aggregation::Count);
    assert_eq!(q.projection, Projection::All);
    round_trip("SELECT count(*) FROM t");
}

#[test]
fn count_distinct_field() {
    let q = parse("SELECT COUNT(DISTINCT city) FROM t");
    assert_eq!(q.aggregation, Aggregation::Count);
    assert_eq!(
        q.projection,
        Projection::Distinct {
            values: vec![Value::field("city")]
        }
    );
    round_trip("SELECT COUNT(DISTINCT city) FROM t");
}

#[test]
fn sum_and_avg_of_one_field() {
    let q = parse("SELECT SUM(amount) FROM payments");
    assert_eq!(q.aggregation, Aggregation::Sum);
    let q = parse("SELECT avg(age) FROM users");
    assert_eq!(q.aggregation, Aggregation::Avg);
    round_trip("SELECT avg(age) FROM users");
}

#[test]
fn sum_of_expression() {
    let q = parse("SELECT SUM(price * quantity) FROM orders");
    assert_eq!(q.aggregation, Aggregation::Sum);
    assert!(matches!(
        q.projection.values(),
        Some([Value::Expression(_)])
    ));
    round_trip("SELECT SUM(price * quantity) FROM orders");
}

#[test]
fn sum_with_wildcard_is_rejected() {
    assert_eq!(
        error_message("SELECT SUM(*) FROM t"),
        "Cannot use 'SUM' aggregation with wildcard"
    );
    assert_eq!(
        error_message("SELECT avg(*) FROM t"),
        "Cannot use 'AVG' aggregation with wildcard"
    );
}

#[test]
fn sum_with_multiple_fields_is_rejected() {
    assert_eq!(
        error_message("SELECT SUM(a,b) FROM t"),
        "Cannot use 'SUM' aggregation with multiple field names"
    );
    assert_eq!(
        error_message("SELECT AVG(DISTINCT a, b) FROM t"),
        "Cannot use 'AVG' aggregation with multiple field names"
    );
}

#[test]
fn column_remapping_is_unsupported() {
    assert_eq!(
        error_message("SELECT name AS n FROM users"),
        "Remapping column names is not currently supported!"
    );
    assert_eq!(
        error_message("SELECT id, name as n FROM users"),
        "Remapping column names is not currently supported!"
    );
}

#[test]
fn aggregate_names_are_plain_identifiers_without_brackets() {
    let q = parse("SELECT count FROM stats");
    assert_eq!(q.aggregation, Aggregation::None);
    assert_eq!(
        q.projection,
        Projection::Selected {
            values: vec![Value::field("count")]
        }
    );
}

#[test]
fn query_serializes_to_tagged_json() {
    let json = serde_json::to_value(parse("SELECT COUNT(*) FROM t")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "projection": {"kind": "ALL"},
            "aggregation": "COUNT",
            "dataset": {"kind": "TABLE", "name": "t"},
            "joins": []
        })
    );
}
