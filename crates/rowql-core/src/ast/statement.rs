//! Query AST types.

use core::fmt;

use serde::Serialize;

use super::{Condition, FunctionResult, Value};
use crate::lexer::Keyword;

/// What a query returns for each row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Projection {
    /// `*`.
    All,
    /// A comma-separated list of values.
    Selected { values: Vec<Value> },
    /// `DISTINCT` followed by a comma-separated list of values.
    Distinct { values: Vec<Value> },
    /// A single function call.
    Function { function: FunctionResult },
}

impl Projection {
    /// Returns the projected values, if this projection carries a list.
    #[must_use]
    pub fn values(&self) -> Option<&[Value]> {
        match self {
            Self::Selected { values } | Self::Distinct { values } => Some(values),
            Self::All | Self::Function { .. } => None,
        }
    }
}

/// Aggregation applied on top of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aggregation {
    /// No aggregation (default).
    #[default]
    None,
    /// `COUNT(...)`.
    Count,
    /// `SUM(...)`.
    Sum,
    /// `AVG(...)`.
    Avg,
}

impl Aggregation {
    /// Returns the aggregate function name, or `""` for [`Aggregation::None`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
        }
    }

    /// Returns the aggregation named by `keyword`, if any.
    #[must_use]
    pub const fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Count => Some(Self::Count),
            Keyword::Sum => Some(Self::Sum),
            Keyword::Avg => Some(Self::Avg),
            _ => None,
        }
    }
}

/// What a query selects from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSet {
    /// A named table.
    Table { name: String },
    /// A bracketed nested query with the alias its rows are known by.
    Subquery { query: Box<Query>, alias: String },
}

impl DataSet {
    /// Creates a table dataset.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table { name: name.into() }
    }
}

/// A joined table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Join {
    /// The joined table name.
    pub table: String,
    /// Alias for the joined table. Never set by the parser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Join {
    /// Creates a join without an alias.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
        }
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the query-text representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ordering {
    /// The field to order by.
    pub field: String,
    /// The direction.
    pub direction: OrderDirection,
}

/// LIMIT and OFFSET values. At least one is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitAndOffset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Value>,
}

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// The projection.
    pub projection: Projection,
    /// The aggregation applied on top of the projection.
    pub aggregation: Aggregation,
    /// The dataset selected from.
    pub dataset: DataSet,
    /// Joined tables; at most one.
    pub joins: Vec<Join>,
    /// The `ON` and `WHERE` conditions, combined with `AND`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// ORDER BY clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,
    /// LIMIT and OFFSET values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_and_offset: Option<LimitAndOffset>,
}

impl Query {
    /// Creates a `SELECT * FROM <table>` query.
    #[must_use]
    pub fn select_all(table: impl Into<String>) -> Self {
        Self {
            projection: Projection::All,
            aggregation: Aggregation::None,
            dataset: DataSet::table(table),
            joins: vec![],
            condition: None,
            ordering: None,
            limit_and_offset: None,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Selected { values } => write_list(f, values),
            Self::Distinct { values } => {
                f.write_str("DISTINCT ")?;
                write_list(f, values)
            }
            Self::Function { function } => write!(f, "{function}"),
        }
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name } => f.write_str(name),
            Self::Subquery { query, alias } => write!(f, "({query}) AS {alias}"),
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORDER BY {} {}", self.field, self.direction.as_str())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        match self.aggregation {
            Aggregation::None => write!(f, "{}", self.projection)?,
            aggregation => write!(f, "{}({})", aggregation.as_str(), self.projection)?,
        }
        write!(f, " FROM {}", self.dataset)?;
        for join in &self.joins {
            write!(f, " JOIN {}", join.table)?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {condition}")?;
        }
        if let Some(ordering) = &self.ordering {
            write!(f, " {ordering}")?;
        }
        if let Some(limit_and_offset) = &self.limit_and_offset {
            if let Some(limit) = &limit_and_offset.limit {
                write!(f, " LIMIT {limit}")?;
            }
            if let Some(offset) = &limit_and_offset.offset {
                write!(f, " OFFSET {offset}")?;
            }
        }
        Ok(())
    }
}
