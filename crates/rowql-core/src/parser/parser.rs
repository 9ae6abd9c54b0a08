//! Query parser entry point.

use super::error::ParseError;
use crate::ast::Query;
use crate::lexer::{Keyword, Token, TokenKind, tokenise};

/// The deepest nesting of subqueries, brackets and conditions accepted.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Query parser.
///
/// Parsing is a pure function of the token slice: the parser never mutates
/// its input and keeps no state between calls apart from the current
/// nesting depth, which is always back at zero once a call returns.
#[derive(Debug, Default)]
pub struct Parser {
    depth: usize,
}

impl Parser {
    /// Creates a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Parses a whole query from a token slice.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for the first problem found; no partial
    /// query is ever returned.
    pub fn parse(&mut self, tokens: &[Token]) -> Result<Query, ParseError> {
        self.depth = 0;
        self.parse_query(tokens)
    }

    /// Runs `f` one nesting level deeper, failing once the ceiling is hit.
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::too_complex(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parses `SELECT ... FROM ...` and every optional clause after it.
    ///
    /// Also used for the inside of bracketed subqueries, so the slice must
    /// hold exactly one query.
    pub(super) fn parse_query(&mut self, tokens: &[Token]) -> Result<Query, ParseError> {
        self.nested(|p| {
            let rest = match tokens.split_first() {
                Some((first, rest)) if first.is_keyword(Keyword::Select) => rest,
                first => {
                    return Err(
                        ParseError::syntax("Expected 'SELECT'").near(first.map(|(t, _)| t))
                    );
                }
            };

            let (projection, aggregation, rest) = p.parse_selection(rest)?;
            let (dataset, rest) = p.parse_from(rest)?;
            let (joins, rest) = p.parse_joins(rest)?;
            let (condition, rest) = p.parse_conditions(rest, !joins.is_empty())?;
            let (ordering, limit_and_offset, rest) = p.parse_trailing(rest)?;
            expect_end(rest)?;

            Ok(Query {
                projection,
                aggregation,
                dataset,
                joins,
                condition,
                ordering,
                limit_and_offset,
            })
        })
    }
}

/// Accepts the end of input, optionally preceded by a single `;`.
fn expect_end(tokens: &[Token]) -> Result<(), ParseError> {
    match tokens {
        [] => Ok(()),
        [last] if last.kind == TokenKind::Semicolon => Ok(()),
        [first, ..] => Err(ParseError::syntax("Expected end of query").at(first.span)),
    }
}

/// Parses a query from a token slice.
///
/// # Errors
///
/// Returns a `ParseError` if the tokens do not form a valid query.
pub fn parse(tokens: &[Token]) -> Result<Query, ParseError> {
    Parser::new().parse(tokens)
}

/// Tokenises and parses a query string.
///
/// # Errors
///
/// Returns a `ParseError` if the input is not a valid query.
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    parse(&tokenise(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Aggregation, DataSet, Projection};
    use crate::parser::ParseErrorKind;

    #[test]
    fn test_select_all() {
        let query = parse_query("SELECT * FROM t").unwrap();
        assert_eq!(query.projection, Projection::All);
        assert_eq!(query.aggregation, Aggregation::None);
        assert_eq!(query.dataset, DataSet::table("t"));
        assert!(query.joins.is_empty());
        assert!(query.condition.is_none());
        assert!(query.ordering.is_none());
        assert!(query.limit_and_offset.is_none());
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            parse_query("select * from t").unwrap(),
            parse_query("SELECT * FROM t").unwrap()
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_query("").unwrap_err().to_string(), "Expected 'SELECT'");
        assert_eq!(parse(&[]).unwrap_err().to_string(), "Expected 'SELECT'");
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(parse_query("SELECT * FROM t;").is_ok());
        let err = parse_query("SELECT * FROM t;;").unwrap_err();
        assert_eq!(err.to_string(), "Expected end of query");
    }

    #[test]
    fn test_depth_ceiling() {
        let open = "(".repeat(200);
        let close = ")".repeat(200);
        let err = parse_query(&format!("SELECT * FROM t WHERE a = {open}1{close}")).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooComplex);
        assert_eq!(
            err.to_string(),
            "Query exceeds the maximum nesting depth of 128"
        );
    }

    #[test]
    fn test_parser_is_reusable_after_errors() {
        let mut parser = Parser::new();
        assert!(parser.parse(&tokenise("SELECT * FROM")).is_err());
        assert!(parser.parse(&tokenise("SELECT * FROM t")).is_ok());
    }
}
