//! Data sources: named tables of rows.

use std::collections::BTreeMap;

use crate::error::Result;

/// One record: a JSON object keyed by column name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A table as listed by a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    /// The table name.
    pub name: String,
}

/// A table that can produce its rows.
pub trait Table {
    /// Returns the table name.
    fn name(&self) -> &str;

    /// Reads every row of the table, in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be produced.
    fn read_full_table(&self) -> Result<Vec<Row>>;
}

/// A collection of named tables.
pub trait DataSource {
    /// Lists the tables, in a stable order.
    fn list_tables(&self) -> Vec<TableInfo>;

    /// Looks up a table by its exact name.
    fn get_table(&self, name: &str) -> Option<&dyn Table>;
}

/// A table held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTable {
    name: String,
    rows: Vec<Row>,
}

impl MemoryTable {
    /// Creates a table from its rows.
    #[must_use]
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl Table for MemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_full_table(&self) -> Result<Vec<Row>> {
        Ok(self.rows.clone())
    }
}

/// A data source whose tables are all held in memory, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    tables: BTreeMap<String, MemoryTable>,
}

impl InMemoryDataSource {
    /// Creates an empty data source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any table of the same name.
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert_table(name, rows);
        self
    }

    /// Adds a table, replacing any table of the same name.
    pub fn insert_table(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        let name = name.into();
        self.tables
            .insert(name.clone(), MemoryTable::new(name, rows));
    }

    /// Returns the number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if there are no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl DataSource for InMemoryDataSource {
    fn list_tables(&self) -> Vec<TableInfo> {
        self.tables
            .keys()
            .map(|name| TableInfo { name: name.clone() })
            .collect()
    }

    fn get_table(&self, name: &str) -> Option<&dyn Table> {
        self.tables.get(name).map(|table| table as &dyn Table)
    }
}
