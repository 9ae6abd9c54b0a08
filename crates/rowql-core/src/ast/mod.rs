//! Abstract Syntax Tree (AST) types for queries.

mod condition;
mod expression;
mod statement;

pub use condition::{BooleanPrefix, ComparisonOp, Condition, Connective};
pub use expression::{FunctionResult, Literal, NumericOperator, Scalar, Term, Value};
pub use statement::{
    Aggregation, DataSet, Join, LimitAndOffset, OrderDirection, Ordering, Projection, Query,
};
