//! Meta-commands: `\list_tables`, `\dump_schema <table>` and `\help`.

use std::collections::BTreeMap;

use rowql_core::tokenise;
use serde_json::Value;

use crate::error::{EngineError, Result};
use crate::source::{DataSource, Row};

/// The character that starts a meta-command.
pub const SIGIL: char = '\\';

const HELP: &str = "\
\\list_tables          List the available tables
\\dump_schema <table>  Show the columns of a table and their types
\\help                 Show this message
\\quit                 Leave the shell";

/// A parsed meta-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `\list_tables`.
    ListTables,
    /// `\dump_schema <table>`.
    DumpSchema(String),
    /// `\help`.
    Help,
}

impl MetaCommand {
    /// Returns true if `line` is a meta-command rather than a query.
    #[must_use]
    pub fn is_meta_command(line: &str) -> bool {
        line.trim_start().starts_with(SIGIL)
    }

    /// Parses a meta-command line.
    ///
    /// The line goes through the query lexer, which drops the sigil since
    /// it is not a token character.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownCommand`] if the line names no known
    /// command or has the wrong arguments.
    pub fn parse(line: &str) -> Result<Self> {
        let tokens = tokenise(line);
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        match words.as_slice() {
            ["list_tables"] => Ok(Self::ListTables),
            ["dump_schema", table] => Ok(Self::DumpSchema((*table).to_string())),
            ["help"] => Ok(Self::Help),
            _ => Err(EngineError::UnknownCommand(line.trim().to_string())),
        }
    }

    /// Runs the command and returns its text output.
    ///
    /// # Errors
    ///
    /// Returns an error if `\dump_schema` names an unknown table or the
    /// table cannot be read.
    pub fn run(&self, source: &dyn DataSource) -> Result<String> {
        match self {
            Self::ListTables => Ok(source
                .list_tables()
                .into_iter()
                .map(|table| table.name)
                .collect::<Vec<_>>()
                .join("\n")),
            Self::DumpSchema(name) => {
                let table = source
                    .get_table(name)
                    .ok_or_else(|| EngineError::TableNotFound(name.clone()))?;
                let rows = table.read_full_table()?;
                let schema = infer_schema(&rows);
                Ok(schema
                    .into_iter()
                    .map(|(column, kind)| format!("{column}: {kind}"))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Self::Help => Ok(HELP.to_string()),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Maps every column seen in any row to its JSON type, or `mixed` when
/// rows disagree.
fn infer_schema(rows: &[Row]) -> BTreeMap<&str, &'static str> {
    let mut schema = BTreeMap::new();
    for row in rows {
        for (column, value) in row {
            let kind = type_name(value);
            schema
                .entry(column.as_str())
                .and_modify(|seen: &mut &'static str| {
                    if *seen != kind {
                        *seen = "mixed";
                    }
                })
                .or_insert(kind);
        }
    }
    schema
}
