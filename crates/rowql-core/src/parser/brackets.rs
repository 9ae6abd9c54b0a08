//! Bracket matching over token slices.

use super::error::ParseError;
use crate::lexer::{Keyword, Token, TokenKind};

/// The indexes of a matched `(` and `)` within a token slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BracketPair {
    pub start: usize,
    pub end: usize,
}

impl BracketPair {
    /// Returns true if `index` lies strictly between the two brackets.
    pub const fn contains(&self, index: usize) -> bool {
        self.start < index && index < self.end
    }
}

/// Finds matched bracket pairs, starting at the first `(` in the slice.
///
/// Nothing is matched when the slice has no `(`, or when its first `(`
/// directly follows `IN`: such a bracket opens a literal set rather than a
/// grouping. Matching stops once the first group closes unless
/// `keep_consuming` is set, in which case every group up to the end of the
/// slice is recorded.
pub(crate) fn find_bracket_pairs(
    tokens: &[Token],
    keep_consuming: bool,
) -> Result<Vec<BracketPair>, ParseError> {
    let Some(first) = tokens.iter().position(|t| t.kind == TokenKind::LeftParen) else {
        return Ok(vec![]);
    };
    if first > 0 && tokens[first - 1].is_keyword(Keyword::In) {
        return Ok(vec![]);
    }

    let mut open = Vec::new();
    let mut pairs = Vec::new();
    for (index, token) in tokens.iter().enumerate().skip(first) {
        match token.kind {
            TokenKind::LeftParen => open.push(index),
            TokenKind::RightParen => {
                let Some(start) = open.pop() else {
                    return Err(ParseError::unbalanced_brackets().at(token.span));
                };
                pairs.push(BracketPair { start, end: index });
                if open.is_empty() && !keep_consuming {
                    return Ok(pairs);
                }
            }
            _ => {}
        }
    }

    match open.last() {
        Some(&start) => Err(ParseError::unbalanced_brackets().at(tokens[start].span)),
        None => Ok(pairs),
    }
}

/// Returns true if `index` lies inside any of `pairs`.
pub(crate) fn is_bracketed(pairs: &[BracketPair], index: usize) -> bool {
    pairs.iter().any(|pair| pair.contains(index))
}

/// Returns the index of the `)` closing the `(` at `open`.
pub(crate) fn matching_bracket(tokens: &[Token], open: usize) -> Result<usize, ParseError> {
    let pairs = find_bracket_pairs(&tokens[open..], false)?;
    pairs
        .last()
        .map(|pair| open + pair.end)
        .ok_or_else(|| ParseError::unbalanced_brackets().at(tokens[open].span))
}

/// Returns true if the whole slice is one bracketed group.
pub(crate) fn is_enclosed(tokens: &[Token]) -> Result<bool, ParseError> {
    match tokens.first() {
        Some(first) if first.kind == TokenKind::LeftParen => {
            Ok(matching_bracket(tokens, 0)? == tokens.len() - 1)
        }
        _ => Ok(false),
    }
}

/// Splits a slice on the commas that sit outside any bracket.
pub(crate) fn split_top_level_commas(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                parts.push(&tokens[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// Returns the index of the first token outside any bracket that satisfies
/// `stop`, or the slice length. An unmatched `)` also stops the scan.
pub(crate) fn top_level_position(tokens: &[Token], stop: impl Fn(&Token) -> bool) -> usize {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen if depth == 0 => return index,
            TokenKind::RightParen => depth -= 1,
            _ if depth == 0 && stop(token) => return index,
            _ => {}
        }
    }
    tokens.len()
}
