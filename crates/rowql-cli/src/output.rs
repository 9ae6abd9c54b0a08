//! Printing results as JSON.

use std::io::Write;

use anyhow::Result;
use rowql_engine::{Output, Row};
use serde::Serialize;

/// Writes values as JSON, one line per value unless `pretty` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    pretty: bool,
}

impl Printer {
    pub const fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn json<T: Serialize>(&self, out: &mut impl Write, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, value)?;
        } else {
            serde_json::to_writer(&mut *out, value)?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn rows(&self, out: &mut impl Write, rows: &[Row]) -> Result<()> {
        for row in rows {
            self.json(out, row)?;
        }
        Ok(())
    }

    /// Writes what a session line produced. Text is written verbatim.
    pub fn output(&self, out: &mut impl Write, output: &Output) -> Result<()> {
        match output {
            Output::Rows(rows) => self.rows(out, rows),
            Output::Text(text) if text.is_empty() => Ok(()),
            Output::Text(text) => {
                writeln!(out, "{text}")?;
                Ok(())
            }
        }
    }
}
