//! Value and expression AST types.

use core::fmt;

use serde::Serialize;

use super::Query;

/// A scalar literal, the element type of literal sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// String literal, without its quotes.
    String(String),
    /// Numeric literal.
    Number(f64),
    /// Boolean literal.
    Boolean(bool),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// String literal, without its quotes.
    String(String),
    /// Numeric literal.
    Number(f64),
    /// Boolean literal.
    Boolean(bool),
    /// Parenthesized set of scalars, as used by `IN` and `BETWEEN`.
    List(Vec<Scalar>),
}

impl Literal {
    /// Returns the scalar form of this literal, or `None` for a set.
    #[must_use]
    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Self::String(s) => Some(Scalar::String(s)),
            Self::Number(n) => Some(Scalar::Number(n)),
            Self::Boolean(b) => Some(Scalar::Boolean(b)),
            Self::List(_) => None,
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl NumericOperator {
    /// Returns the query-text representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// One link of an expression chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Term {
    /// An operand.
    Operand(Value),
    /// The operator between two operands.
    Operator(NumericOperator),
}

/// A function call such as `UPPER(name)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionResult {
    /// The function name as written.
    pub name: String,
    /// The arguments, in order.
    pub args: Vec<Value>,
}

impl FunctionResult {
    /// Creates a new function call.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// A value: anything that can appear as an operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Value {
    /// A field reference, possibly dotted (`table.column`).
    Field(String),
    /// A literal.
    Literal(Literal),
    /// A function call.
    FunctionResult(FunctionResult),
    /// Alternating operands and operators.
    ///
    /// `+` and `-` form one flat left-to-right chain; `*` and `/` always
    /// form a three-link chain. Unary minus is `[-1, *, operand]`.
    Expression(Vec<Term>),
    /// A bracketed nested query.
    Subquery(Box<Query>),
}

impl Value {
    /// Creates a field reference.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Creates a numeric literal.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    /// Creates a three-link `lhs op rhs` expression.
    #[must_use]
    pub fn binary(lhs: Self, op: NumericOperator, rhs: Self) -> Self {
        Self::Expression(vec![
            Term::Operand(lhs),
            Term::Operator(op),
            Term::Operand(rhs),
        ])
    }

    /// Creates the unary-minus form `[-1, *, operand]`.
    #[must_use]
    pub fn negative(operand: Self) -> Self {
        Self::binary(Self::number(-1.0), NumericOperator::Multiply, operand)
    }

    /// Returns the operand if this is the unary-minus form.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn negated_operand(&self) -> Option<&Self> {
        match self {
            Self::Expression(chain) => match chain.as_slice() {
                [
                    Term::Operand(Self::Literal(Literal::Number(n))),
                    Term::Operator(NumericOperator::Multiply),
                    Term::Operand(operand),
                ] if *n == -1.0 => Some(operand),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns the scalar this value denotes, folding `-<number>` into a
    /// negative number.
    #[must_use]
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Literal(literal) => literal.clone().into_scalar(),
            _ => match self.negated_operand() {
                Some(Self::Literal(Literal::Number(n))) => Some(Scalar::Number(-n)),
                _ => None,
            },
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    // Strings carry no escapes, so pick the quote the text does not use.
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}{s}{quote}")
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_quoted(f, s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_quoted(f, s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for NumericOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FunctionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Writes a value that sits inside an expression chain.
///
/// Nested expressions are always bracketed so the chain re-parses with the
/// same shape.
fn write_operand(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Expression(_) => write!(f, "({value})"),
        _ => write!(f, "{value}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::FunctionResult(function) => write!(f, "{function}"),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::Expression(chain) => {
                if let Some(operand) = self.negated_operand() {
                    f.write_str("-")?;
                    return write_operand(f, operand);
                }
                for (i, term) in chain.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match term {
                        Term::Operand(value) => write_operand(f, value)?,
                        Term::Operator(op) => write!(f, "{op}")?,
                    }
                }
                Ok(())
            }
        }
    }
}
