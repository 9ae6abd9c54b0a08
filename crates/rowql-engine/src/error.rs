//! Error types for the query engine.

use std::path::PathBuf;

use rowql_core::ParseError;

/// Errors that can occur while loading data or running a line.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The query names a table the data source does not have.
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// The query is valid but uses something the executor cannot run.
    #[error("{0}")]
    Unsupported(String),

    /// IO error (reading data files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A data file is valid JSON but not shaped like a table.
    #[error("Invalid data in '{path}': {message}")]
    InvalidData {
        /// Path to the data file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The line is not a valid query.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The line starts with the meta-command sigil but names no command.
    #[error("Unknown command '{0}'. Type \\help for the list of commands")]
    UnknownCommand(String),
}

impl EngineError {
    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub(crate) fn invalid_data(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
