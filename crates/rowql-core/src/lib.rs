//! # rowql-core
//!
//! The lexer, parser and AST of the rowql query language.
//!
//! This crate provides:
//! - A hand-written lexer producing positioned tokens
//! - A recursive descent parser that splits token slices at their loosest
//!   operator, using explicit bracket matching
//! - An immutable, serializable AST whose `Display` output re-parses to the
//!   same tree
//!
//! ## Parsing
//!
//! ```rust
//! use rowql_core::ast::{ComparisonOp, Condition, DataSet, Projection, Value};
//! use rowql_core::parse_query;
//!
//! let query = parse_query("SELECT * FROM users WHERE age > 21").unwrap();
//! assert_eq!(query.projection, Projection::All);
//! assert_eq!(query.dataset, DataSet::table("users"));
//! assert_eq!(
//!     query.condition,
//!     Some(Condition::compare(Value::field("age"), ComparisonOp::Gt, Value::number(21.0)))
//! );
//! ```
//!
//! ## Errors
//!
//! Parsing stops at the first problem. The error displays as a fixed
//! message and remembers where the offending token was:
//!
//! ```rust
//! use rowql_core::parse_query;
//!
//! let err = parse_query("SELECT *").unwrap_err();
//! assert_eq!(err.to_string(), "Expected 'FROM'");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Condition, Query, Value};
pub use lexer::{Lexer, Token, TokenKind, tokenise};
pub use parser::{ParseError, ParseErrorKind, Parser, parse, parse_query};
