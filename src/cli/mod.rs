mod session;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

use crate::application::ExpenseTracker;
use crate::io::{CsvRenderer, JsonRenderer, OutputRenderer, TableRenderer};

pub use session::Session;

/// Spendlog - Expense Tracker
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Track expenses for the length of a terminal session")]
#[command(version)]
pub struct Cli {
    /// How the expense list is rendered after every change
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Currency symbol shown in front of amounts
    #[arg(long, default_value = "$")]
    pub currency: String,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        tracing::debug!(format = ?self.format, currency = %self.currency, "starting session");

        let renderer = build_renderer(self.format, io::stdout(), &self.currency);
        let tracker = ExpenseTracker::new(renderer).context("Failed to render the expense list")?;

        let stdin = io::stdin();
        let interactive = stdin.is_terminal();

        // Keep machine-readable output on stdout clean
        let messages: Box<dyn Write> = match self.format {
            OutputFormat::Table => Box::new(io::stdout()),
            OutputFormat::Json | OutputFormat::Csv => Box::new(io::stderr()),
        };

        let mut session = Session::new(tracker, stdin.lock(), messages, self.currency)
            .with_prompt(interactive);
        session.run()
    }
}

pub fn build_renderer<W: Write>(format: OutputFormat, out: W, currency: &str) -> OutputRenderer<W> {
    match format {
        OutputFormat::Table => OutputRenderer::Table(TableRenderer::new(out, currency)),
        OutputFormat::Json => OutputRenderer::Json(JsonRenderer::new(out)),
        OutputFormat::Csv => OutputRenderer::Csv(CsvRenderer::new(out)),
    }
}

/// Install the global stderr subscriber. Call once, from `main`.
/// `RUST_LOG` wins over the verbose flag when set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["spendlog"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.currency, "$");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_flags() {
        let cli =
            Cli::try_parse_from(["spendlog", "--format", "json", "--currency", "€", "-v"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.currency, "€");
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["spendlog", "--format", "xml"]).is_err());
    }
}
