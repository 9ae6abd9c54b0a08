//! Dataset, join, condition and trailing clause parsing.

use super::Parser;
use super::brackets::{matching_bracket, top_level_position};
use super::error::ParseError;
use crate::ast::{Condition, DataSet, Join, LimitAndOffset, OrderDirection, Ordering};
use crate::lexer::{Keyword, Token, TokenKind};

/// Returns true for a token that starts a trailing clause or ends the query.
fn ends_trailing_clause(token: &Token) -> bool {
    token.kind == TokenKind::Semicolon
        || matches!(
            token.keyword(),
            Some(Keyword::Order | Keyword::Limit | Keyword::Offset)
        )
}

/// Tokens allowed directly after a joined table name.
fn may_follow_join(token: Option<&Token>) -> bool {
    match token {
        None => true,
        Some(token) => {
            token.kind == TokenKind::Semicolon
                || matches!(
                    token.keyword(),
                    Some(
                        Keyword::Where
                            | Keyword::On
                            | Keyword::Order
                            | Keyword::Limit
                            | Keyword::Offset
                    )
                )
        }
    }
}

impl Parser {
    /// Parses `FROM <table>` or `FROM ( <query> ) AS <alias>`.
    pub(super) fn parse_from<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> Result<(DataSet, &'t [Token]), ParseError> {
        let rest = match tokens.split_first() {
            Some((first, rest)) if first.is_keyword(Keyword::From) => rest,
            first => {
                return Err(ParseError::syntax("Expected 'FROM'").near(first.map(|(t, _)| t)));
            }
        };

        match rest.first() {
            Some(open) if open.kind == TokenKind::LeftParen => {
                let close = matching_bracket(rest, 0)?;
                let query = self.parse_query(&rest[1..close])?;
                match &rest[close + 1..] {
                    [as_keyword, alias, tail @ ..]
                        if as_keyword.is_keyword(Keyword::As) && alias.is_identifier() =>
                    {
                        let dataset = DataSet::Subquery {
                            query: Box::new(query),
                            alias: alias.text.clone(),
                        };
                        Ok((dataset, tail))
                    }
                    after => Err(ParseError::syntax("Expected an alias for subquery results")
                        .near(after.first().or(Some(&rest[close])))),
                }
            }
            Some(name) if name.is_identifier() => {
                Ok((DataSet::table(name.text.clone()), &rest[1..]))
            }
            other => Err(ParseError::syntax("Expected a table name").near(other)),
        }
    }

    /// Parses an optional `JOIN <table>`. Only a single join is supported.
    pub(super) fn parse_joins<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> Result<(Vec<Join>, &'t [Token]), ParseError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Ok((vec![], tokens));
        };
        if !first.is_keyword(Keyword::Join) {
            return Ok((vec![], tokens));
        }

        let table = match rest.first() {
            Some(name) if name.is_identifier() => name,
            other => {
                return Err(ParseError::syntax("Expected a table name after 'JOIN'").near(other));
            }
        };
        let rest = &rest[1..];
        if !may_follow_join(rest.first()) {
            return Err(ParseError::unsupported(
                "Multiple joins and aliases not currently supported",
            )
            .near(rest.first()));
        }
        Ok((vec![Join::new(table.text.clone())], rest))
    }

    /// Parses the optional `ON` and `WHERE` clauses.
    ///
    /// `ON` is only recognised after a join. When both are present the
    /// result is `on AND where`.
    pub(super) fn parse_conditions<'t>(
        &mut self,
        tokens: &'t [Token],
        joined: bool,
    ) -> Result<(Option<Condition>, &'t [Token]), ParseError> {
        let mut rest = tokens;

        let mut on = None;
        if joined && rest.first().is_some_and(|t| t.is_keyword(Keyword::On)) {
            let (condition, after) = self.parse_condition(&rest[1..])?;
            on = Some(condition);
            rest = after;
        }

        let mut filter = None;
        if rest.first().is_some_and(|t| t.is_keyword(Keyword::Where)) {
            let (condition, after) = self.parse_condition(&rest[1..])?;
            filter = Some(condition);
            rest = after;
        }

        let condition = match (on, filter) {
            (Some(on), Some(filter)) => Some(on.and(filter)),
            (on, filter) => on.or(filter),
        };
        Ok((condition, rest))
    }

    /// Parses `ORDER BY`, `LIMIT` and `OFFSET` clauses in any order.
    ///
    /// A clause that appears twice is overwritten by the later one.
    pub(super) fn parse_trailing<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> Result<(Option<Ordering>, Option<LimitAndOffset>, &'t [Token]), ParseError> {
        let mut ordering = None;
        let mut limit = None;
        let mut offset = None;
        let mut rest = tokens;

        while let Some((first, after)) = rest.split_first() {
            let Some(keyword @ (Keyword::Order | Keyword::Limit | Keyword::Offset)) =
                first.keyword()
            else {
                break;
            };
            let end = top_level_position(after, ends_trailing_clause);
            let segment = &after[..end];
            rest = &after[end..];

            match keyword {
                Keyword::Order => ordering = Some(parse_ordering(first, segment)?),
                Keyword::Limit => {
                    if segment.is_empty() {
                        return Err(ParseError::syntax("Value required for limit!").at(first.span));
                    }
                    limit = Some(self.parse_complete_value(segment)?);
                }
                _ => {
                    if segment.is_empty() {
                        return Err(ParseError::syntax("Value required for offset!").at(first.span));
                    }
                    offset = Some(self.parse_complete_value(segment)?);
                }
            }
        }

        let limit_and_offset = (limit.is_some() || offset.is_some())
            .then(|| LimitAndOffset { limit, offset });
        Ok((ordering, limit_and_offset, rest))
    }
}

/// Parses `BY <field> [ASC|DESC]`.
fn parse_ordering(order: &Token, segment: &[Token]) -> Result<Ordering, ParseError> {
    let invalid = || ParseError::syntax("Invalid ordering!").at(order.span);
    let (by, field, direction) = match segment {
        [by, field] => (by, field, None),
        [by, field, direction] => (by, field, Some(direction)),
        _ => return Err(invalid()),
    };
    if !by.is_keyword(Keyword::By) || !field.is_identifier() {
        return Err(invalid());
    }
    let direction = match direction.map(Token::keyword) {
        None => OrderDirection::Asc,
        Some(Some(Keyword::Asc)) => OrderDirection::Asc,
        Some(Some(Keyword::Desc)) => OrderDirection::Desc,
        Some(_) => return Err(invalid()),
    };
    Ok(Ordering {
        field: field.text.clone(),
        direction,
    })
}
