//! Boolean condition AST types.

use core::fmt;

use serde::Serialize;

use super::{Literal, Value};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Like,
    In,
    Between,
}

impl ComparisonOp {
    /// Returns the query-text representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Between => "BETWEEN",
        }
    }

    /// Returns true for the operators spelled as words.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::Like | Self::In | Self::Between)
    }
}

/// Connective joining the two halves of a condition pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    /// Returns the query-text representation of the connective.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// The boolean modifier a condition node reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanPrefix {
    /// A plain comparison.
    None,
    /// A negated comparison.
    Not,
    /// Both halves must hold.
    And,
    /// Either half must hold.
    Or,
}

/// A boolean condition.
///
/// `NOT` never appears as a node of its own: it is recorded as the
/// `negated` flag of the condition that directly follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    /// One comparison between two values.
    Singular {
        /// Whether the comparison was preceded by `NOT`.
        negated: bool,
        /// The comparison operator.
        comparison: ComparisonOp,
        /// Left operand.
        lhs: Value,
        /// Right operand.
        rhs: Value,
    },
    /// Two conditions joined by `AND` or `OR`.
    Pair {
        /// The joining connective.
        connective: Connective,
        /// Whether the whole pair was preceded by `NOT`.
        negated: bool,
        /// Left condition.
        lhs: Box<Condition>,
        /// Right condition.
        rhs: Box<Condition>,
    },
}

impl Condition {
    /// Creates a non-negated comparison.
    #[must_use]
    pub const fn compare(lhs: Value, comparison: ComparisonOp, rhs: Value) -> Self {
        Self::Singular {
            negated: false,
            comparison,
            lhs,
            rhs,
        }
    }

    /// Joins two conditions with a connective.
    #[must_use]
    pub fn pair(connective: Connective, lhs: Self, rhs: Self) -> Self {
        Self::Pair {
            connective,
            negated: false,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Joins two conditions with `AND`.
    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        Self::pair(Connective::And, self, rhs)
    }

    /// Joins two conditions with `OR`.
    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        Self::pair(Connective::Or, self, rhs)
    }

    /// Marks this condition as negated.
    ///
    /// Negation overwrites rather than toggles: `NOT NOT a = 1` is still
    /// negated.
    #[must_use]
    pub fn negate(mut self) -> Self {
        match &mut self {
            Self::Singular { negated, .. } | Self::Pair { negated, .. } => *negated = true,
        }
        self
    }

    /// Returns true if this condition is negated.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        match self {
            Self::Singular { negated, .. } | Self::Pair { negated, .. } => *negated,
        }
    }

    /// Returns the boolean modifier of this node: `None`/`Not` for a
    /// comparison, `And`/`Or` for a pair.
    #[must_use]
    pub const fn boolean_prefix(&self) -> BooleanPrefix {
        match self {
            Self::Singular { negated: true, .. } => BooleanPrefix::Not,
            Self::Singular { negated: false, .. } => BooleanPrefix::None,
            Self::Pair {
                connective: Connective::And,
                ..
            } => BooleanPrefix::And,
            Self::Pair {
                connective: Connective::Or,
                ..
            } => BooleanPrefix::Or,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular {
                negated,
                comparison,
                lhs,
                rhs,
            } => {
                if *negated {
                    f.write_str("NOT ")?;
                }
                match (comparison, rhs) {
                    (ComparisonOp::Between, Value::Literal(Literal::List(bounds)))
                        if bounds.len() == 2 =>
                    {
                        write!(f, "{lhs} BETWEEN {} AND {}", bounds[0], bounds[1])
                    }
                    _ => write!(f, "{lhs} {comparison} {rhs}"),
                }
            }
            Self::Pair {
                connective,
                negated,
                lhs,
                rhs,
            } => {
                if *negated {
                    f.write_str("NOT (")?;
                }
                // Splitting happens at the first connective, so only a pair
                // on the left needs brackets.
                match lhs.as_ref() {
                    Self::Pair { negated: false, .. } => write!(f, "({lhs})")?,
                    _ => write!(f, "{lhs}")?,
                }
                write!(f, " {connective} {rhs}")?;
                if *negated {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(field: &str, n: f64) -> Condition {
        Condition::compare(Value::field(field), ComparisonOp::Eq, Value::number(n))
    }

    #[test]
    fn test_boolean_prefix() {
        assert_eq!(eq("a", 1.0).boolean_prefix(), BooleanPrefix::None);
        assert_eq!(eq("a", 1.0).negate().boolean_prefix(), BooleanPrefix::Not);
        assert_eq!(
            eq("a", 1.0).or(eq("b", 2.0)).boolean_prefix(),
            BooleanPrefix::Or
        );
    }

    #[test]
    fn test_negate_keeps_connective() {
        let negated = eq("a", 1.0).and(eq("b", 2.0)).negate();
        assert!(negated.is_negated());
        assert_eq!(negated.boolean_prefix(), BooleanPrefix::And);
    }

    #[test]
    fn test_display_brackets_left_pairs_only() {
        let left = eq("a", 1.0).or(eq("b", 2.0)).and(eq("c", 3.0));
        assert_eq!(left.to_string(), "(a = 1 OR b = 2) AND c = 3");
        let right = eq("a", 1.0).or(eq("b", 2.0).and(eq("c", 3.0)));
        assert_eq!(right.to_string(), "a = 1 OR b = 2 AND c = 3");
    }

    #[test]
    fn test_display_negations() {
        assert_eq!(eq("a", 1.0).negate().to_string(), "NOT a = 1");
        let pair = eq("a", 1.0).and(eq("b", 2.0)).negate();
        assert_eq!(pair.to_string(), "NOT (a = 1 AND b = 2)");
    }
}
