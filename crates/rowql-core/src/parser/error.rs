//! Parser error types.

use crate::lexer::{Span, Token};

/// Broad classification of a parse failure.
///
/// Every kind aborts the parse immediately; they differ only in what the
/// caller may want to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Missing keyword or clause, unbalanced brackets, malformed lists.
    Syntax,
    /// Well-formed but meaningless, such as `SUM(*)`.
    Semantic,
    /// Recognised but not implemented, such as a second join.
    Unsupported,
    /// Nesting deeper than the parser's recursion ceiling.
    TooComplex,
}

/// A parse error.
///
/// Displays as the bare message; the location, when known, is kept in
/// [`ParseError::span`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// What kind of failure this is.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the offending token, if any.
    pub span: Option<Span>,
}

impl ParseError {
    /// Creates a new parse error without a location.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Syntax, message)
    }

    /// Creates a semantic error.
    #[must_use]
    pub fn semantic(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Semantic, message)
    }

    /// Creates an unsupported-feature error.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Unsupported, message)
    }

    /// Creates the error raised when nesting exceeds `limit` levels.
    #[must_use]
    pub fn too_complex(limit: usize) -> Self {
        Self::new(
            ParseErrorKind::TooComplex,
            format!("Query exceeds the maximum nesting depth of {limit}"),
        )
    }

    /// Creates the error raised when a bracket is never closed.
    #[must_use]
    pub fn unbalanced_brackets() -> Self {
        Self::syntax("Could not find matching bracket pairs!")
    }

    /// Creates an "unexpected token" error located at `token`.
    #[must_use]
    pub fn unexpected(token: &Token) -> Self {
        Self::syntax(format!("Unexpected token '{}'", token.text)).at(token.span)
    }

    /// Attaches a source location.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attaches the location of `token` when there is one.
    #[must_use]
    pub fn near(self, token: Option<&Token>) -> Self {
        match token {
            Some(token) => self.at(token.span),
            None => self,
        }
    }
}
