//! Query parser.
//!
//! A hand-written recursive descent parser. Each clause parser takes a
//! token slice and returns what it parsed together with the unconsumed
//! rest of the slice; nothing is ever mutated in place.

mod brackets;
mod clauses;
mod condition;
mod error;
mod parser;
mod selection;
mod value;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{MAX_NESTING_DEPTH, Parser, parse, parse_query};
