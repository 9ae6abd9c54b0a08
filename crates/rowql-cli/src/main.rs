//! rowql CLI
//!
//! Runs SQL-like queries over tables of JSON rows.

mod output;
mod shell;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use rowql_engine::{DataSource, Session, load_path};

use crate::output::Printer;
use crate::shell::Shell;

/// Query JSON data with a small subset of SQL.
#[derive(Parser)]
#[command(name = "rowql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A JSON file of tables, or a directory of .json / .jsonl tables.
    #[arg(env = "ROWQL_DATA")]
    data: PathBuf,

    /// Run a single statement and exit.
    #[arg(short, long)]
    query: Option<String>,

    /// Print the parsed query as JSON instead of running it.
    #[arg(long)]
    ast: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = load_path(&cli.data)
        .with_context(|| format!("Failed to load data from '{}'", cli.data.display()))?;
    debug!(
        path = %cli.data.display(),
        tables = source.list_tables().len(),
        "Loaded data"
    );

    let shell = Shell::new(Session::new(source), Printer::new(cli.pretty), cli.ast);

    if let Some(query) = &cli.query {
        shell.handle_line(query, &mut io::stdout().lock())?;
        return Ok(());
    }

    if io::stdin().is_terminal() {
        shell.run_interactive()
    } else {
        shell.run_stream(io::stdin().lock(), &mut io::stdout().lock())
    }
}
