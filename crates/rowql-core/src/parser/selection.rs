//! Projection and aggregation parsing.

use super::Parser;
use super::brackets::matching_bracket;
use super::error::ParseError;
use crate::ast::{Aggregation, Projection, Value};
use crate::lexer::{Keyword, Token, TokenKind};

impl Parser {
    /// Parses what follows `SELECT`, up to but excluding `FROM`.
    pub(super) fn parse_selection<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> Result<(Projection, Aggregation, &'t [Token]), ParseError> {
        let Some(first) = tokens.first() else {
            return Err(ParseError::syntax("Expected a selection"));
        };

        if first.kind == TokenKind::Star {
            return Ok((Projection::All, Aggregation::None, &tokens[1..]));
        }

        let aggregation = first.keyword().and_then(Aggregation::from_keyword);
        let opens = tokens
            .get(1)
            .is_some_and(|t| t.kind == TokenKind::LeftParen);
        if let (Some(aggregation), true) = (aggregation, opens) {
            let close = matching_bracket(tokens, 1)?;
            let projection = self.parse_aggregated(aggregation, &tokens[2..close], first)?;
            return Ok((projection, aggregation, &tokens[close + 1..]));
        }

        if first.is_identifier() && opens {
            let close = matching_bracket(tokens, 1)?;
            let function = self
                .parse_function(&tokens[..=close])?
                .ok_or_else(|| ParseError::syntax("Not a valid arguments list").at(first.span))?;
            let projection = Projection::Function { function };
            return Ok((projection, Aggregation::None, &tokens[close + 1..]));
        }

        let distinct = first.is_keyword(Keyword::Distinct);
        let mut rest = if distinct { &tokens[1..] } else { tokens };
        let mut values = Vec::new();
        loop {
            let (value, after) = self.parse_value(rest)?;
            values.push(value);
            match after.first() {
                Some(token) if token.is_keyword(Keyword::As) => {
                    return Err(ParseError::unsupported(
                        "Remapping column names is not currently supported!",
                    )
                    .at(token.span));
                }
                Some(token) if token.kind == TokenKind::Comma => rest = &after[1..],
                _ => {
                    rest = after;
                    break;
                }
            }
        }

        let projection = match (distinct, values.as_slice()) {
            (false, [Value::FunctionResult(function)]) => Projection::Function {
                function: function.clone(),
            },
            (false, _) => Projection::Selected { values },
            (true, _) => Projection::Distinct { values },
        };
        Ok((projection, Aggregation::None, rest))
    }

    /// Parses the selection inside `COUNT(...)`, `SUM(...)` or `AVG(...)`.
    fn parse_aggregated(
        &mut self,
        aggregation: Aggregation,
        inner: &[Token],
        name: &Token,
    ) -> Result<Projection, ParseError> {
        let (projection, nested, rest) = self.nested(|p| p.parse_selection(inner))?;
        if nested != Aggregation::None {
            return Err(ParseError::unsupported(
                "Nested aggregations are not currently supported",
            )
            .at(name.span));
        }
        if let Some(token) = rest.first() {
            return Err(ParseError::unexpected(token));
        }

        if matches!(aggregation, Aggregation::Sum | Aggregation::Avg) {
            let label = aggregation.as_str();
            match &projection {
                Projection::All => {
                    return Err(ParseError::semantic(format!(
                        "Cannot use '{label}' aggregation with wildcard"
                    ))
                    .at(name.span));
                }
                Projection::Selected { values } | Projection::Distinct { values }
                    if values.len() > 1 =>
                {
                    return Err(ParseError::semantic(format!(
                        "Cannot use '{label}' aggregation with multiple field names"
                    ))
                    .at(name.span));
                }
                _ => {}
            }
        }
        Ok(projection)
    }
}
