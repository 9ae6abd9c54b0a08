//! Query lexer.
//!
//! This module provides a hand-written lexer that turns query text into an
//! ordered list of positioned tokens.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;

/// Tokenises a whole query string.
#[must_use]
pub fn tokenise(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
