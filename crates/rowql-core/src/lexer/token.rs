//! Token types for the query lexer.

use super::Span;

/// Words with a grammatical role in the query language.
///
/// Tokens are never lexed as keywords; a [`TokenKind::Word`] is looked up
/// here on demand, so `select`, `SELECT` and `SeLeCt` are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    Join,
    On,
    As,
    Distinct,

    // Boolean connectives and comparisons
    And,
    Or,
    Not,
    Like,
    In,
    Between,

    // Trailing clauses
    Order,
    By,
    Asc,
    Desc,
    Limit,
    Offset,

    // Aggregates
    Count,
    Sum,
    Avg,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "JOIN" => Some(Self::Join),
            "ON" => Some(Self::On),
            "AS" => Some(Self::As),
            "DISTINCT" => Some(Self::Distinct),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "LIKE" => Some(Self::Like),
            "IN" => Some(Self::In),
            "BETWEEN" => Some(Self::Between),
            "ORDER" => Some(Self::Order),
            "BY" => Some(Self::By),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "COUNT" => Some(Self::Count),
            "SUM" => Some(Self::Sum),
            "AVG" => Some(Self::Avg),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Join => "JOIN",
            Self::On => "ON",
            Self::As => "AS",
            Self::Distinct => "DISTINCT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
        }
    }

    /// Returns true if the keyword can never name a field or table.
    ///
    /// Aggregate names stay usable as plain identifiers and function names.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        !matches!(self, Self::Count | Self::Sum | Self::Avg)
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Arithmetic
    /// *
    Star,
    /// +
    Plus,
    /// -
    Minus,
    /// /
    Slash,

    // Literals and names
    /// Decimal number (e.g., 42 or 3.14)
    Number,
    /// Identifier or keyword, possibly dotted or hyphenated (e.g., users.age)
    Word,
    /// Single- or double-quoted string, quotes included in the text
    String,

    // Punctuation
    /// ,
    Comma,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ;
    Semicolon,

    // Comparison
    /// =
    Eq,
    /// <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
}

/// A token with its raw text and location in the query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The raw source text of the token.
    pub text: String,
    /// The location in the query text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Returns the 1-based line the token starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    /// Returns the keyword if this is a word naming one.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Word => Keyword::from_str(&self.text),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword, in any letter case.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    /// Returns true if this is a word that can name a field, table or function.
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Word && !self.keyword().is_some_and(|kw| kw.is_reserved())
    }

    /// Returns true for `+`, `-`, `*` and `/`.
    #[must_use]
    pub const fn is_arithmetic_operator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Token {
        Token::new(TokenKind::Word, text, Span::new(0, text.len(), 1))
    }

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("users"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Between.as_str(), "BETWEEN");
        assert_eq!(Keyword::Avg.as_str(), "AVG");
    }

    #[test]
    fn test_aggregates_are_not_reserved() {
        assert!(Keyword::Where.is_reserved());
        assert!(!Keyword::Count.is_reserved());
        assert!(word("count").is_identifier());
        assert!(!word("from").is_identifier());
    }

    #[test]
    fn test_only_words_are_keywords() {
        let quoted = Token::new(TokenKind::String, "'select'", Span::new(0, 8, 1));
        assert_eq!(quoted.keyword(), None);
        assert!(word("Where").is_keyword(Keyword::Where));
    }
}
