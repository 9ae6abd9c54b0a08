//! Boolean condition parsing.

use super::Parser;
use super::brackets::{find_bracket_pairs, is_bracketed, is_enclosed, top_level_position};
use super::error::ParseError;
use crate::ast::{ComparisonOp, Condition, Connective, Literal, Value};
use crate::lexer::{Keyword, Token, TokenKind};

fn connective(token: &Token) -> Option<Connective> {
    match token.keyword()? {
        Keyword::And => Some(Connective::And),
        Keyword::Or => Some(Connective::Or),
        _ => None,
    }
}

fn comparison(token: &Token) -> Option<ComparisonOp> {
    match token.kind {
        TokenKind::Eq => Some(ComparisonOp::Eq),
        TokenKind::NotEq => Some(ComparisonOp::NotEq),
        TokenKind::Lt => Some(ComparisonOp::Lt),
        TokenKind::LtEq => Some(ComparisonOp::LtEq),
        TokenKind::Gt => Some(ComparisonOp::Gt),
        TokenKind::GtEq => Some(ComparisonOp::GtEq),
        TokenKind::Word => match token.keyword()? {
            Keyword::Like => Some(ComparisonOp::Like),
            Keyword::In => Some(ComparisonOp::In),
            Keyword::Between => Some(ComparisonOp::Between),
            _ => None,
        },
        _ => None,
    }
}

/// Returns true for a token that ends a condition clause.
fn ends_condition(token: &Token) -> bool {
    token.kind == TokenKind::Semicolon
        || matches!(
            token.keyword(),
            Some(Keyword::Where | Keyword::Order | Keyword::Limit | Keyword::Offset)
        )
}

impl Parser {
    /// Parses one condition clause from the front of `tokens`, returning the
    /// rest.
    ///
    /// The clause runs up to the first `;`, `WHERE`, `ORDER`, `LIMIT` or
    /// `OFFSET` outside brackets.
    pub(super) fn parse_condition<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> Result<(Condition, &'t [Token]), ParseError> {
        let extent = top_level_position(tokens, ends_condition);
        if extent == 0 {
            return Err(ParseError::syntax("Expected a condition").near(tokens.first()));
        }
        let condition = self.parse_condition_exact(&tokens[..extent])?;
        Ok((condition, &tokens[extent..]))
    }

    /// Parses exactly the given tokens as one condition.
    ///
    /// The slice is split at its first `AND`/`OR` outside brackets, so a
    /// chain nests to the right. Failing that, a leading `NOT` negates the
    /// rest; then the first comparison operator outside brackets splits the
    /// slice into two values; finally one enclosing bracket pair is removed.
    pub(super) fn parse_condition_exact(
        &mut self,
        tokens: &[Token],
    ) -> Result<Condition, ParseError> {
        self.nested(|p| {
            let Some(first) = tokens.first() else {
                return Err(ParseError::syntax("Expected a condition"));
            };
            let pairs = find_bracket_pairs(tokens, true)?;

            if let Some((index, connective)) = find_connective(tokens, |i| is_bracketed(&pairs, i))
            {
                let (lhs, rhs) = (&tokens[..index], &tokens[index + 1..]);
                if lhs.is_empty() || rhs.is_empty() {
                    return Err(ParseError::syntax("Expected a condition").at(tokens[index].span));
                }
                let lhs = p.parse_condition_exact(lhs)?;
                let rhs = p.parse_condition_exact(rhs)?;
                return Ok(Condition::pair(connective, lhs, rhs));
            }

            if first.is_keyword(Keyword::Not) {
                return Ok(p.parse_condition_exact(&tokens[1..])?.negate());
            }

            let split = tokens
                .iter()
                .enumerate()
                .filter(|&(i, _)| !is_bracketed(&pairs, i))
                .find_map(|(i, t)| comparison(t).map(|op| (i, op)));
            if let Some((index, op)) = split {
                return p.parse_comparison(tokens, index, op);
            }

            if is_enclosed(tokens)? {
                return p.parse_condition_exact(&tokens[1..tokens.len() - 1]);
            }
            Err(ParseError::syntax("Expected a comparison operator").at(first.span))
        })
    }

    /// Builds the comparison whose operator sits at `tokens[index]`.
    fn parse_comparison(
        &mut self,
        tokens: &[Token],
        index: usize,
        op: ComparisonOp,
    ) -> Result<Condition, ParseError> {
        let operator = &tokens[index];
        let mut lhs = &tokens[..index];
        let mut negated = false;
        if op.is_keyword() {
            if let Some((last, rest)) = lhs.split_last() {
                if last.is_keyword(Keyword::Not) {
                    negated = true;
                    lhs = rest;
                }
            }
        }
        let rhs = &tokens[index + 1..];
        if lhs.is_empty() || rhs.is_empty() {
            return Err(ParseError::syntax("Expected a value").at(operator.span));
        }

        let lhs = self.parse_value_exact(lhs)?;
        let rhs = match op {
            ComparisonOp::Between => self.parse_between_bounds(rhs, operator)?,
            ComparisonOp::In => {
                let set = self.parse_value_exact(rhs)?;
                match set.to_scalar() {
                    Some(scalar) => Value::Literal(Literal::List(vec![scalar])),
                    None => set,
                }
            }
            _ => self.parse_value_exact(rhs)?,
        };

        let condition = Condition::compare(lhs, op, rhs);
        Ok(if negated { condition.negate() } else { condition })
    }

    /// Parses `low AND high` into a two-element literal list.
    fn parse_between_bounds(
        &mut self,
        tokens: &[Token],
        operator: &Token,
    ) -> Result<Value, ParseError> {
        let and = top_level_position(tokens, |t| t.is_keyword(Keyword::And));
        if and == tokens.len() {
            return Err(
                ParseError::syntax("Expected 'AND' in BETWEEN condition").at(operator.span)
            );
        }
        let mut bounds = Vec::with_capacity(2);
        for bound in [&tokens[..and], &tokens[and + 1..]] {
            if bound.is_empty() {
                return Err(ParseError::syntax("Expected a value").at(tokens[and].span));
            }
            let value = self.parse_value_exact(bound)?;
            let scalar = value.to_scalar().ok_or_else(|| {
                ParseError::unsupported("Handling of non-literal values in sets not yet implemented")
                    .at(bound[0].span)
            })?;
            bounds.push(scalar);
        }
        Ok(Value::Literal(Literal::List(bounds)))
    }
}

/// Finds the first connective outside brackets, skipping the `AND` that
/// belongs to a preceding `BETWEEN`.
fn find_connective(
    tokens: &[Token],
    bracketed: impl Fn(usize) -> bool,
) -> Option<(usize, Connective)> {
    let mut pending_between = false;
    for (index, token) in tokens.iter().enumerate() {
        if bracketed(index) {
            continue;
        }
        if token.is_keyword(Keyword::Between) {
            pending_between = true;
            continue;
        }
        match connective(token) {
            Some(Connective::And) if pending_between => pending_between = false,
            Some(connective) => return Some((index, connective)),
            None => {}
        }
    }
    None
}
