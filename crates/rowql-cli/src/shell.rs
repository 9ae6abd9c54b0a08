//! The interactive and streaming shells.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rowql_core::lexer::Span;
use rowql_core::{ParseError, parse_query};
use rowql_engine::{DataSource, EngineError, MetaCommand, Session};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, error};

use crate::output::Printer;

/// Prompt shown before each line in the interactive shell.
pub const PROMPT: &str = "rowql> ";

/// Whether the shell keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs lines against a session and prints what they produce.
pub struct Shell<S> {
    session: Session<S>,
    printer: Printer,
    ast: bool,
}

impl<S: DataSource> Shell<S> {
    /// With `ast` set, queries are parsed and printed as JSON instead of
    /// being executed. Meta-commands always run.
    pub const fn new(session: Session<S>, printer: Printer, ast: bool) -> Self {
        Self {
            session,
            printer,
            ast,
        }
    }

    /// Runs one line. Blank lines do nothing.
    pub fn handle_line(&self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if matches!(line, "\\quit" | "\\exit") {
            return Ok(Flow::Quit);
        }

        if self.ast && !MetaCommand::is_meta_command(line) {
            let query = parse_query(line)?;
            self.printer.json(out, &query)?;
        } else {
            let output = self.session.run_line(line)?;
            self.printer.output(out, &output)?;
        }
        Ok(Flow::Continue)
    }

    /// Runs one line, reporting a failure on stderr instead of returning it.
    fn handle_reporting(&self, line: &str, out: &mut impl Write) -> Flow {
        match self.handle_line(line, out) {
            Ok(flow) => flow,
            Err(e) => {
                if let Some(span) = parse_error_span(&e) {
                    debug!(location = %span, "Parse error");
                }
                eprintln!("Error: {e}");
                Flow::Continue
            }
        }
    }

    /// Reads lines with editing and history until `\quit` or end of input.
    pub fn run_interactive(&self) -> Result<()> {
        let mut editor = DefaultEditor::new()?;
        let stdout = io::stdout();
        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line.trim());
                    if self.handle_reporting(&line, &mut stdout.lock()) == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {}
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    error!("Readline error: {}", e);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Reads one statement per line from `input` until `\quit` or end of
    /// input.
    pub fn run_stream(&self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if self.handle_reporting(&line, out) == Flow::Quit {
                debug!("Quit requested");
                break;
            }
            out.flush()?;
        }
        Ok(())
    }
}

/// Finds where in the line a parse failure happened, if it was one.
fn parse_error_span(error: &anyhow::Error) -> Option<Span> {
    let parse_error = match error.downcast_ref::<EngineError>() {
        Some(EngineError::Parse(parse_error)) => parse_error,
        _ => error.downcast_ref::<ParseError>()?,
    };
    parse_error.span
}
