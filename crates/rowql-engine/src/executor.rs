//! Query execution against a data source.

use rowql_core::ast::{Aggregation, DataSet, Projection, Query};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::source::{DataSource, Row};

/// Runs a query and returns its rows.
///
/// Only `SELECT * FROM <table>` is executed: the table's rows come back
/// unmodified. Every other query shape is rejected with
/// [`EngineError::Unsupported`] rather than half-evaluated.
///
/// # Errors
///
/// Returns an error if the query uses anything besides a wildcard
/// projection over a table, or if the table does not exist.
pub fn execute(query: &Query, source: &dyn DataSource) -> Result<Vec<Row>> {
    debug!(query = %query, "Executing query");

    if query.projection != Projection::All {
        return Err(EngineError::unsupported(
            "Only 'SELECT *' projections are currently supported",
        ));
    }
    if query.aggregation != Aggregation::None {
        return Err(EngineError::unsupported(format!(
            "'{}' aggregation is not currently supported",
            query.aggregation.as_str()
        )));
    }
    let name = match &query.dataset {
        DataSet::Table { name } => name,
        DataSet::Subquery { .. } => {
            return Err(EngineError::unsupported(
                "Selecting from a subquery is not currently supported",
            ));
        }
    };
    if !query.joins.is_empty() {
        return Err(EngineError::unsupported("Joins are not currently supported"));
    }
    if query.condition.is_some() {
        return Err(EngineError::unsupported(
            "Filtering rows is not currently supported",
        ));
    }
    if query.ordering.is_some() {
        return Err(EngineError::unsupported(
            "Ordering rows is not currently supported",
        ));
    }
    if query.limit_and_offset.is_some() {
        return Err(EngineError::unsupported(
            "LIMIT and OFFSET are not currently supported",
        ));
    }

    let table = source
        .get_table(name)
        .ok_or_else(|| EngineError::TableNotFound(name.clone()))?;
    let rows = table.read_full_table()?;
    debug!(table = %name, rows = rows.len(), "Read table");
    Ok(rows)
}
