//! Tests for WHERE conditions: comparisons, connectives, NOT,
//! brackets, LIKE, IN and BETWEEN.

mod common;
use common::*;

use rowql_core::ast::{BooleanPrefix, ComparisonOp, Condition, Literal, Scalar, Value};

fn eq(field: &str, n: f64) -> Condition {
    Condition::compare(Value::field(field), ComparisonOp::Eq, Value::number(n))
}

// ===================================================================
// Comparisons
// ===================================================================

#[test]
fn every_comparison_operator() {
    let cases = [
        ("=", ComparisonOp::Eq),
        ("<>", ComparisonOp::NotEq),
        (">", ComparisonOp::Gt),
        ("<", ComparisonOp::Lt),
        (">=", ComparisonOp::GtEq),
        ("<=", ComparisonOp::LtEq),
    ];
    for (text, op) in cases {
        assert_eq!(
            parse_where(&format!("age {text} 21")),
            Condition::compare(Value::field("age"), op, Value::number(21.0)),
            "{text}"
        );
        round_trip(&format!("SELECT * FROM t WHERE age {text} 21"));
    }
}

#[test]
fn comparison_without_spaces() {
    assert_eq!(parse_where("age>21"), parse_where("age > 21"));
}

#[test]
fn trailing_semicolon_does_not_change_the_condition() {
    for condition in ["a = 1", "name LIKE 'J%'", "x <> 'y'", "n >= 2.5"] {
        let with = parse(&format!("SELECT * FROM t WHERE {condition};"));
        let without = parse(&format!("SELECT * FROM t WHERE {condition}"));
        assert_eq!(with.condition, without.condition, "{condition}");
    }
}

#[test]
fn field_compared_with_field() {
    assert_eq!(
        parse_where("a.id = b.id"),
        Condition::compare(Value::field("a.id"), ComparisonOp::Eq, Value::field("b.id"))
    );
}

#[test]
fn like() {
    assert_eq!(
        parse_where("name like \"J%\""),
        Condition::compare(Value::field("name"), ComparisonOp::Like, Value::string("J%"))
    );
    round_trip("SELECT * FROM t WHERE name LIKE 'J%'");
}

// ===================================================================
// Connectives
// ===================================================================

#[test]
fn and_or_chain_nests_to_the_right() {
    assert_eq!(
        parse_where("a=1 or b=2 and c=3"),
        eq("a", 1.0).or(eq("b", 2.0).and(eq("c", 3.0)))
    );
    round_trip("SELECT * FROM t WHERE a=1 or b=2 and c=3");
}

#[test]
fn brackets_override_first_match_splitting() {
    let condition = parse_where("(a=1 or b=2) and c=3");
    assert_eq!(condition, eq("a", 1.0).or(eq("b", 2.0)).and(eq("c", 3.0)));
    assert_eq!(condition.boolean_prefix(), BooleanPrefix::And);
    round_trip("SELECT * FROM t WHERE (a=1 or b=2) and c=3");
}

#[test]
fn redundant_brackets_are_removed() {
    assert_eq!(parse_where("((a = 1))"), eq("a", 1.0));
}

// ===================================================================
// NOT
// ===================================================================

#[test]
fn not_binds_to_the_next_condition() {
    let condition = parse_where("NOT a=1 and b=2");
    assert_eq!(condition, eq("a", 1.0).negate().and(eq("b", 2.0)));
    match &condition {
        Condition::Pair { lhs, rhs, .. } => {
            assert_eq!(lhs.boolean_prefix(), BooleanPrefix::Not);
            assert_eq!(rhs.boolean_prefix(), BooleanPrefix::None);
        }
        other => panic!("Expected a pair, got {other:?}"),
    }
    round_trip("SELECT * FROM t WHERE NOT a=1 and b=2");
}

#[test]
fn not_is_never_a_node_of_its_own() {
    let condition = parse_where("NOT NOT a = 1");
    assert_eq!(condition, eq("a", 1.0).negate());
}

#[test]
fn not_over_a_bracketed_pair() {
    let condition = parse_where("NOT (a = 1 OR b = 2)");
    assert!(condition.is_negated());
    assert_eq!(condition.boolean_prefix(), BooleanPrefix::Or);
    round_trip("SELECT * FROM t WHERE NOT (a = 1 OR b = 2) AND c = 3");
}

#[test]
fn not_before_keyword_operators() {
    assert_eq!(
        parse_where("name NOT LIKE 'A%'"),
        Condition::compare(Value::field("name"), ComparisonOp::Like, Value::string("A%")).negate()
    );
    assert!(parse_where("id not in (1, 2)").is_negated());
    assert!(parse_where("x NOT BETWEEN 1 AND 2").is_negated());
    round_trip("SELECT * FROM t WHERE name NOT LIKE 'A%'");
}

// ===================================================================
// IN
// ===================================================================

#[test]
fn in_number_set() {
    assert_eq!(
        parse_where("ID IN (1,3)"),
        Condition::compare(
            Value::field("ID"),
            ComparisonOp::In,
            Value::Literal(Literal::List(vec![Scalar::Number(1.0), Scalar::Number(3.0)]))
        )
    );
    round_trip("SELECT * FROM t WHERE ID IN (1,3)");
}

#[test]
fn in_mixed_set() {
    assert_eq!(
        parse_where("name IN ('ann', \"bob\", 4, -2, false)"),
        Condition::compare(
            Value::field("name"),
            ComparisonOp::In,
            Value::Literal(Literal::List(vec![
                Scalar::String("ann".into()),
                Scalar::String("bob".into()),
                Scalar::Number(4.0),
                Scalar::Number(-2.0),
                Scalar::Boolean(false),
            ]))
        )
    );
    round_trip("SELECT * FROM t WHERE name IN ('ann', \"bob\", 4, -2, false)");
}

#[test]
fn in_single_element_set() {
    assert_eq!(
        parse_where("id IN (5)"),
        Condition::compare(
            Value::field("id"),
            ComparisonOp::In,
            Value::Literal(Literal::List(vec![Scalar::Number(5.0)]))
        )
    );
    round_trip("SELECT * FROM t WHERE id IN (5)");
}

#[test]
fn in_subquery() {
    let condition = parse_where("id IN (SELECT user_id FROM orders)");
    match condition {
        Condition::Singular {
            comparison: ComparisonOp::In,
            rhs: Value::Subquery(query),
            ..
        } => assert_eq!(query.to_string(), "SELECT user_id FROM orders"),
        other => panic!("Expected IN subquery, got {other:?}"),
    }
}

#[test]
fn in_set_followed_by_grouping() {
    let condition = parse_where("x IN (1, 2) AND (a = 1 OR b = 2)");
    assert_eq!(condition.boolean_prefix(), BooleanPrefix::And);
}

#[test]
fn in_set_disables_bracket_matching_for_the_slice() {
    // Matching starts at the first `(`, which here opens the IN operand,
    // so the AND inside the subquery is taken as the top-level connective.
    assert_eq!(
        error_message("SELECT * FROM t WHERE id IN (SELECT a FROM b WHERE c = 1 AND d = 2)"),
        "Could not find matching bracket pairs!"
    );
}

#[test]
fn non_literal_set_members_are_unsupported() {
    assert_eq!(
        error_message("SELECT * FROM t WHERE id IN (1, other)"),
        "Handling of non-literal values in sets not yet implemented"
    );
}

#[test]
fn malformed_set() {
    assert_eq!(error_message("SELECT * FROM t WHERE id IN (1,,2)"), "Not a valid set");
    assert_eq!(error_message("SELECT * FROM t WHERE id IN (1,)"), "Not a valid set");
}

// ===================================================================
// BETWEEN
// ===================================================================

#[test]
fn between_bounds_form_a_list() {
    assert_eq!(
        parse_where("age BETWEEN 18 AND 65"),
        Condition::compare(
            Value::field("age"),
            ComparisonOp::Between,
            Value::Literal(Literal::List(vec![Scalar::Number(18.0), Scalar::Number(65.0)]))
        )
    );
    round_trip("SELECT * FROM t WHERE age BETWEEN 18 AND 65");
}

#[test]
fn between_and_is_not_a_connective() {
    let condition = parse_where("age BETWEEN 18 AND 65 AND name = 'x' OR y = 1");
    assert_eq!(condition.boolean_prefix(), BooleanPrefix::And);
    match &condition {
        Condition::Pair { lhs, .. } => assert!(matches!(
            lhs.as_ref(),
            Condition::Singular {
                comparison: ComparisonOp::Between,
                ..
            }
        )),
        other => panic!("Expected a pair, got {other:?}"),
    }
    round_trip("SELECT * FROM t WHERE age BETWEEN 18 AND 65 AND name = 'x' OR y = 1");
}

#[test]
fn between_needs_and() {
    assert_eq!(
        error_message("SELECT * FROM t WHERE age BETWEEN 18"),
        "Expected 'AND' in BETWEEN condition"
    );
}
