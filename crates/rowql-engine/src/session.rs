//! Line-at-a-time dispatch between queries and meta-commands.

use rowql_core::parse_query;
use tracing::debug;

use crate::error::Result;
use crate::executor::execute;
use crate::meta::MetaCommand;
use crate::source::{DataSource, Row};

/// What running one line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Rows returned by a query.
    Rows(Vec<Row>),
    /// Text printed by a meta-command.
    Text(String),
}

/// A shell session over one data source.
#[derive(Debug)]
pub struct Session<S> {
    source: S,
}

impl<S: DataSource> Session<S> {
    /// Creates a session over `source`.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the data source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Runs one line: a meta-command if it starts with `\`, a query
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not parse or cannot be run.
    pub fn run_line(&self, line: &str) -> Result<Output> {
        if MetaCommand::is_meta_command(line) {
            let command = MetaCommand::parse(line)?;
            debug!(command = ?command, "Running meta-command");
            return command.run(&self.source).map(Output::Text);
        }

        let query = parse_query(line)?;
        execute(&query, &self.source).map(Output::Rows)
    }
}
