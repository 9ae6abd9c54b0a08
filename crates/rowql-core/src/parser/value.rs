//! Value and arithmetic expression parsing.

use std::borrow::Cow;

use super::Parser;
use super::brackets::{
    find_bracket_pairs, is_bracketed, is_enclosed, matching_bracket, split_top_level_commas,
};
use super::error::ParseError;
use crate::ast::{FunctionResult, Literal, NumericOperator, Term, Value};
use crate::lexer::{Keyword, Token, TokenKind};

fn numeric_operator(token: &Token) -> Option<NumericOperator> {
    match token.kind {
        TokenKind::Plus => Some(NumericOperator::Add),
        TokenKind::Minus => Some(NumericOperator::Subtract),
        TokenKind::Star => Some(NumericOperator::Multiply),
        TokenKind::Slash => Some(NumericOperator::Divide),
        _ => None,
    }
}

/// Returns the end of the operand starting at `index`, if one starts there.
fn operand_end(tokens: &[Token], index: usize) -> Result<Option<usize>, ParseError> {
    let Some(token) = tokens.get(index) else {
        return Ok(None);
    };
    let end = match token.kind {
        TokenKind::LeftParen => matching_bracket(tokens, index)? + 1,
        TokenKind::Number | TokenKind::String => index + 1,
        TokenKind::Word if token.is_identifier() => {
            match tokens.get(index + 1) {
                Some(next) if next.kind == TokenKind::LeftParen => {
                    matching_bracket(tokens, index + 1)? + 1
                }
                _ => index + 1,
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(end))
}

/// Returns how many leading tokens form one value: optional unary minuses,
/// an operand, then any number of operator and operand pairs.
///
/// An operator with no operand after it is left out.
pub(crate) fn value_extent(tokens: &[Token]) -> Result<usize, ParseError> {
    let mut index = 0;
    let mut complete = 0;
    loop {
        while tokens.get(index).is_some_and(|t| t.kind == TokenKind::Minus) {
            index += 1;
        }
        let Some(end) = operand_end(tokens, index)? else {
            return Ok(complete);
        };
        complete = end;
        match tokens.get(end) {
            Some(token) if token.is_arithmetic_operator() => index = end + 1,
            _ => return Ok(complete),
        }
    }
}

/// Rewrites each unary `-` into `( -1 ) *`.
///
/// A minus is unary at the start of the slice or after an operator, `(` or
/// `,`. The rewrite leaves the rest of the parse to handle negation as an
/// ordinary multiplication.
fn rewrite_unary_minus(tokens: &[Token]) -> Cow<'_, [Token]> {
    let is_unary = |index: usize| {
        tokens[index].kind == TokenKind::Minus
            && (index == 0
                || matches!(
                    tokens[index - 1].kind,
                    TokenKind::Plus
                        | TokenKind::Minus
                        | TokenKind::Star
                        | TokenKind::Slash
                        | TokenKind::LeftParen
                        | TokenKind::Comma
                ))
    };
    if !(0..tokens.len()).any(is_unary) {
        return Cow::Borrowed(tokens);
    }

    let mut rewritten = Vec::with_capacity(tokens.len() + 3);
    for (index, token) in tokens.iter().enumerate() {
        if is_unary(index) {
            let span = token.span;
            rewritten.push(Token::new(TokenKind::LeftParen, "(", span));
            rewritten.push(Token::new(TokenKind::Number, "-1", span));
            rewritten.push(Token::new(TokenKind::RightParen, ")", span));
            rewritten.push(Token::new(TokenKind::Star, "*", span));
        } else {
            rewritten.push(token.clone());
        }
    }
    Cow::Owned(rewritten)
}

impl Parser {
    /// Parses one value from the front of `tokens`, returning the rest.
    pub(super) fn parse_value<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> Result<(Value, &'t [Token]), ParseError> {
        self.take_value(tokens)?.ok_or_else(|| {
            ParseError::syntax("Expected a value").near(tokens.first())
        })
    }

    /// Like [`Parser::parse_value`], but returns `None` when no value
    /// starts at the front of `tokens`.
    pub(super) fn take_value<'t>(
        &mut self,
        tokens: &'t [Token],
    ) -> Result<Option<(Value, &'t [Token])>, ParseError> {
        let extent = value_extent(tokens)?;
        if extent == 0 {
            return Ok(None);
        }
        let value = self.parse_value_exact(&tokens[..extent])?;
        Ok(Some((value, &tokens[extent..])))
    }

    /// Parses a value that must use every token of the slice.
    pub(super) fn parse_complete_value(&mut self, tokens: &[Token]) -> Result<Value, ParseError> {
        let (value, rest) = self.parse_value(tokens)?;
        match rest.first() {
            Some(token) => Err(ParseError::unexpected(token)),
            None => Ok(value),
        }
    }

    /// Parses exactly the given tokens as one value.
    ///
    /// Forms are tried in order: literal set, subquery, arithmetic
    /// expression, function call, then a single literal or field token.
    pub(super) fn parse_value_exact(&mut self, tokens: &[Token]) -> Result<Value, ParseError> {
        self.nested(|p| {
            if tokens.is_empty() {
                return Err(ParseError::syntax("Expected a value"));
            }
            if let Some(set) = p.parse_set(tokens)? {
                return Ok(set);
            }
            if let Some(query) = p.parse_subquery(tokens)? {
                return Ok(query);
            }
            if let Some(expression) = p.parse_expression(tokens)? {
                return Ok(expression);
            }
            if let Some(function) = p.parse_function(tokens)? {
                return Ok(Value::FunctionResult(function));
            }
            parse_single(tokens)
        })
    }

    /// `( a, b, ... )` where every element is a literal.
    fn parse_set(&mut self, tokens: &[Token]) -> Result<Option<Value>, ParseError> {
        if !is_enclosed(tokens)? {
            return Ok(None);
        }
        let inner = &tokens[1..tokens.len() - 1];
        if inner.first().is_some_and(|t| t.is_keyword(Keyword::Select)) {
            return Ok(None);
        }
        let elements = split_top_level_commas(inner);
        if elements.len() < 2 {
            return Ok(None);
        }

        let mut scalars = Vec::with_capacity(elements.len());
        for element in elements {
            if element.is_empty() {
                return Err(ParseError::syntax("Not a valid set").at(tokens[0].span));
            }
            let value = self.parse_value_exact(element)?;
            let scalar = value.to_scalar().ok_or_else(|| {
                ParseError::unsupported("Handling of non-literal values in sets not yet implemented")
                    .at(element[0].span)
            })?;
            scalars.push(scalar);
        }
        Ok(Some(Value::Literal(Literal::List(scalars))))
    }

    /// `( SELECT ... )`.
    fn parse_subquery(&mut self, tokens: &[Token]) -> Result<Option<Value>, ParseError> {
        if !is_enclosed(tokens)? || !tokens[1].is_keyword(Keyword::Select) {
            return Ok(None);
        }
        let query = self.parse_query(&tokens[1..tokens.len() - 1])?;
        Ok(Some(Value::Subquery(Box::new(query))))
    }

    /// Arithmetic over operands, by splitting at the loosest operator.
    ///
    /// `+` and `-` build one flat chain. Otherwise the slice is split once
    /// at its first `*`, then at its first `/`. A slice that is one
    /// bracketed group is unwrapped.
    fn parse_expression(&mut self, tokens: &[Token]) -> Result<Option<Value>, ParseError> {
        let tokens = rewrite_unary_minus(tokens);
        let tokens = tokens.as_ref();
        let pairs = find_bracket_pairs(tokens, true)?;
        let top_level = |index: usize| !is_bracketed(&pairs, index);

        let additive: Vec<(usize, NumericOperator)> = tokens
            .iter()
            .enumerate()
            .filter(|&(i, t)| matches!(t.kind, TokenKind::Plus | TokenKind::Minus) && top_level(i))
            .filter_map(|(i, t)| numeric_operator(t).map(|op| (i, op)))
            .collect();
        if !additive.is_empty() {
            let mut chain = Vec::with_capacity(additive.len() * 2 + 1);
            let mut start = 0;
            for &(index, op) in &additive {
                chain.push(Term::Operand(self.parse_operand(tokens, start, index)?));
                chain.push(Term::Operator(op));
                start = index + 1;
            }
            chain.push(Term::Operand(self.parse_operand(tokens, start, tokens.len())?));
            return Ok(Some(Value::Expression(chain)));
        }

        for (kind, op) in [
            (TokenKind::Star, NumericOperator::Multiply),
            (TokenKind::Slash, NumericOperator::Divide),
        ] {
            let split = (0..tokens.len()).find(|&i| tokens[i].kind == kind && top_level(i));
            if let Some(index) = split {
                let lhs = self.parse_operand(tokens, 0, index)?;
                let rhs = self.parse_operand(tokens, index + 1, tokens.len())?;
                return Ok(Some(Value::binary(lhs, op, rhs)));
            }
        }

        if is_enclosed(tokens)? {
            return self.parse_value_exact(&tokens[1..tokens.len() - 1]).map(Some);
        }
        Ok(None)
    }

    /// Parses `tokens[start..end]` as one operand of an operator at
    /// `tokens[end]` or `tokens[start - 1]`.
    fn parse_operand(
        &mut self,
        tokens: &[Token],
        start: usize,
        end: usize,
    ) -> Result<Value, ParseError> {
        if start == end {
            let operator = tokens
                .get(end)
                .or_else(|| start.checked_sub(1).and_then(|i| tokens.get(i)));
            return Err(ParseError::syntax("Expected a value").near(operator));
        }
        self.parse_value_exact(&tokens[start..end])
    }

    /// `name( args... )` filling the whole slice.
    pub(super) fn parse_function(
        &mut self,
        tokens: &[Token],
    ) -> Result<Option<FunctionResult>, ParseError> {
        let [name, open, ..] = tokens else {
            return Ok(None);
        };
        if !name.is_identifier() || open.kind != TokenKind::LeftParen {
            return Ok(None);
        }
        if matching_bracket(tokens, 1)? != tokens.len() - 1 {
            return Ok(None);
        }
        let args = self.parse_arguments(&tokens[2..tokens.len() - 1])?;
        Ok(Some(FunctionResult::new(name.text.clone(), args)))
    }

    /// Parses alternating values and commas.
    fn parse_arguments(&mut self, tokens: &[Token]) -> Result<Vec<Value>, ParseError> {
        let mut args = Vec::new();
        let mut rest = tokens;
        while !rest.is_empty() {
            let Some((value, after)) = self.take_value(rest)? else {
                return Err(ParseError::syntax("Not a valid arguments list").near(rest.first()));
            };
            args.push(value);
            rest = match after {
                [] => after,
                [comma, tail @ ..] if comma.kind == TokenKind::Comma && !tail.is_empty() => tail,
                _ => {
                    return Err(ParseError::syntax("Not a valid arguments list").near(after.first()));
                }
            };
        }
        Ok(args)
    }
}

/// A number, string, boolean or field token.
fn parse_single(tokens: &[Token]) -> Result<Value, ParseError> {
    let token = match tokens {
        [token] => token,
        [_, second, ..] => return Err(ParseError::unexpected(second)),
        [] => return Err(ParseError::syntax("Expected a value")),
    };
    match token.kind {
        TokenKind::Number => token.text.parse::<f64>().map(Value::number).map_err(|_| {
            ParseError::syntax(format!("Invalid number '{}'", token.text)).at(token.span)
        }),
        TokenKind::String => {
            let text = &token.text;
            Ok(Value::string(&text[1..text.len() - 1]))
        }
        TokenKind::Word if token.text == "true" => Ok(Value::boolean(true)),
        TokenKind::Word if token.text == "false" => Ok(Value::boolean(false)),
        TokenKind::Word if token.is_identifier() => Ok(Value::field(token.text.clone())),
        _ => Err(ParseError::unexpected(token)),
    }
}
