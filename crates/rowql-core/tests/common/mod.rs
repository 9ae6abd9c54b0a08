#![allow(dead_code)]

use rowql_core::ast::{Condition, Query};
use rowql_core::{ParseError, parse_query};

pub fn parse(sql: &str) -> Query {
    parse_query(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_query(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

/// Parses `sql` and returns its error message.
pub fn error_message(sql: &str) -> String {
    parse_err(sql).to_string()
}

/// Parses `SELECT * FROM t WHERE <condition>` and returns the condition.
pub fn parse_where(condition: &str) -> Condition {
    let sql = format!("SELECT * FROM t WHERE {condition}");
    parse(&sql)
        .condition
        .unwrap_or_else(|| panic!("Expected a condition for: {sql}"))
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string and the same tree again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    assert_eq!(ast1, ast2, "Round-trip changed the tree for: {sql}");
}
