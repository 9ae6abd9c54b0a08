//! Query tokenizer implementation.

use super::{Span, Token, TokenKind};

/// A lexer that tokenizes query text.
///
/// Token classes are tried in a fixed order at each position: arithmetic
/// operators, numbers, words, punctuation, comparison operators, the
/// statement terminator and quoted strings. A character that starts none of
/// them is skipped without producing a token.
pub struct Lexer<'a> {
    /// The input query text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// The current 1-based line.
    line: usize,
    /// The line on which the current token started.
    start_line: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            &self.input[self.start..self.pos],
            Span::new(self.start, self.pos, self.start_line),
        )
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
    }

    /// Scans an integer or decimal number.
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.make_token(TokenKind::Number)
    }

    /// Scans a word: identifiers, keywords and dotted or hyphenated paths.
    fn scan_word(&mut self) -> Token {
        while self.peek().is_some_and(Self::is_word_char) {
            self.advance();
        }
        self.make_token(TokenKind::Word)
    }

    /// Scans a quoted string; the quotes stay part of the token text.
    ///
    /// Returns `None` and rewinds to just after the opening quote when the
    /// string is never closed, so the quote itself is dropped.
    fn scan_string(&mut self, quote: char) -> Option<Token> {
        let (resume_pos, resume_line) = (self.pos, self.line);
        loop {
            match self.advance() {
                Some(c) if c == quote => return Some(self.make_token(TokenKind::String)),
                Some(_) => {}
                None => {
                    self.pos = resume_pos;
                    self.line = resume_line;
                    return None;
                }
            }
        }
    }

    /// Scans the next token, or returns `None` at the end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            self.start = self.pos;
            self.start_line = self.line;

            let c = self.advance()?;
            let token = match c {
                '*' => self.make_token(TokenKind::Star),
                '+' => self.make_token(TokenKind::Plus),
                '/' => self.make_token(TokenKind::Slash),
                '-' => self.make_token(TokenKind::Minus),

                c if c.is_ascii_digit() => self.scan_number(),
                c if Self::is_word_char(c) => self.scan_word(),

                ',' => self.make_token(TokenKind::Comma),
                '(' => self.make_token(TokenKind::LeftParen),
                ')' => self.make_token(TokenKind::RightParen),

                '<' => match self.peek() {
                    Some('=') => {
                        self.advance();
                        self.make_token(TokenKind::LtEq)
                    }
                    Some('>') => {
                        self.advance();
                        self.make_token(TokenKind::NotEq)
                    }
                    _ => self.make_token(TokenKind::Lt),
                },
                '>' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        self.make_token(TokenKind::GtEq)
                    } else {
                        self.make_token(TokenKind::Gt)
                    }
                }
                '=' => self.make_token(TokenKind::Eq),
                ';' => self.make_token(TokenKind::Semicolon),

                '"' | '\'' => match self.scan_string(c) {
                    Some(token) => token,
                    None => continue,
                },

                // Unrecognised characters never produce a token.
                _ => continue,
            };
            return Some(token);
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn token_texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  ").is_empty());
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            token_kinds("SELECT id, name FROM users WHERE active = 1;"),
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Comma,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Eq,
                TokenKind::Number,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(
            token_kinds("* + / -"),
            vec![
                TokenKind::Star,
                TokenKind::Plus,
                TokenKind::Slash,
                TokenKind::Minus,
            ]
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            token_kinds("<= >= <> < > ="),
            vec![
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(token_texts("42 3.14 7."), vec!["42", "3.14", "7", "."]);
        assert_eq!(token_kinds("3.14")[0], TokenKind::Number);
    }

    #[test]
    fn test_minus_is_never_part_of_a_number() {
        assert_eq!(token_texts("-2"), vec!["-", "2"]);
        assert_eq!(token_texts("3-2"), vec!["3", "-", "2"]);
    }

    #[test]
    fn test_dotted_and_hyphenated_words() {
        assert_eq!(
            token_texts("users.age first-name a-1"),
            vec!["users.age", "first-name", "a-1"]
        );
    }

    #[test]
    fn test_strings_keep_their_quotes() {
        assert_eq!(
            token_texts(r#"'hello world' "it's""#),
            vec!["'hello world'", "\"it's\""]
        );
        assert_eq!(
            token_kinds("'a' \"b\""),
            vec![TokenKind::String, TokenKind::String]
        );
    }

    #[test]
    fn test_unterminated_quote_is_dropped() {
        assert_eq!(token_texts("'abc"), vec!["abc"]);
    }

    #[test]
    fn test_unrecognised_characters_are_skipped() {
        assert_eq!(token_texts("\\list_tables"), vec!["list_tables"]);
        assert_eq!(token_texts("a ! b @ c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6, 1));
        assert_eq!(tokens[1].span, Span::new(7, 9, 1));
    }

    #[test]
    fn test_line_tracking() {
        let tokens = tokenize("SELECT *\nFROM t\n\nWHERE 'a\nb' = x");
        let lines: Vec<usize> = tokens.iter().map(Token::line).collect();
        assert_eq!(lines, vec![1, 1, 2, 2, 4, 4, 5, 5]);
    }
}
