//! Loading tables from JSON files.
//!
//! Two layouts are accepted:
//!
//! - a single JSON file holding an object that maps table names to arrays
//!   of rows, such as `{"users": [{"id": 1}], "orders": []}`;
//! - a directory in which every `<table>.json` file holds an array of rows
//!   and every `<table>.jsonl` file holds one row per line.
//!
//! Every row must be a JSON object, and no two files may name the same
//! table.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::source::{DataSource, InMemoryDataSource, Row};

/// Loads every table found at `path`, which may be a file or a directory.
///
/// # Errors
///
/// Returns an error if a file cannot be read, is not valid JSON, or is not
/// shaped like a table.
pub fn load_path(path: impl AsRef<Path>) -> Result<InMemoryDataSource> {
    let path = path.as_ref();
    let source = if path.is_dir() {
        load_directory(path)?
    } else {
        load_file(path)?
    };
    debug!(path = %path.display(), tables = source.len(), "Loaded data source");
    Ok(source)
}

/// Loads a single JSON file mapping table names to rows.
fn load_file(path: &Path) -> Result<InMemoryDataSource> {
    let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let Value::Object(tables) = value else {
        return Err(EngineError::invalid_data(
            path,
            "expected an object mapping table names to rows",
        ));
    };

    let mut source = InMemoryDataSource::new();
    for (name, rows) in tables {
        let rows = rows_from_array(path, rows)?;
        debug!(table = %name, rows = rows.len(), "Loaded table");
        source.insert_table(name, rows);
    }
    Ok(source)
}

/// Loads every `.json` and `.jsonl` file of a directory as one table.
fn load_directory(dir: &Path) -> Result<InMemoryDataSource> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()?;
    paths.sort();

    let mut source = InMemoryDataSource::new();
    for path in paths {
        let stem = path.file_stem().and_then(OsStr::to_str);
        let extension = path.extension().and_then(OsStr::to_str);
        let (Some(name), Some(extension @ ("json" | "jsonl"))) = (stem, extension) else {
            warn!(path = %path.display(), "Skipping file that is not .json or .jsonl");
            continue;
        };
        if path.is_dir() {
            warn!(path = %path.display(), "Skipping directory");
            continue;
        }
        if source.get_table(name).is_some() {
            return Err(EngineError::invalid_data(
                &path,
                format!("table '{name}' is defined by more than one file"),
            ));
        }

        let text = fs::read_to_string(&path)?;
        let rows = if extension == "json" {
            rows_from_array(&path, serde_json::from_str(&text)?)?
        } else {
            rows_from_lines(&path, &text)?
        };
        debug!(table = %name, rows = rows.len(), "Loaded table");
        source.insert_table(name, rows);
    }
    Ok(source)
}

fn rows_from_array(path: &Path, value: Value) -> Result<Vec<Row>> {
    match value {
        Value::Array(items) => items.into_iter().map(|item| into_row(path, item)).collect(),
        _ => Err(EngineError::invalid_data(path, "expected an array of rows")),
    }
}

/// Parses JSON Lines; blank lines are ignored.
fn rows_from_lines(path: &Path, text: &str) -> Result<Vec<Row>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| into_row(path, serde_json::from_str(line)?))
        .collect()
}

fn into_row(path: &Path, value: Value) -> Result<Row> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(EngineError::invalid_data(
            path,
            format!("expected every row to be an object, found {other}"),
        )),
    }
}
