// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for orgwatch.
//!
//! Uses clap's derive API with noun-verb subcommands.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the generate subcommand with shell-specific examples.
const COMPLETION_GENERATE_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(orgwatch completion generate bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      orgwatch completion generate zsh > ~/.zsh/completions/_orgwatch

    Add to ~/.zshrc (before compinit):
      fpath=(~/.zsh/completions $fpath)
      autoload -U compinit && compinit -i

  fish
    Generate completion file:
      orgwatch completion generate fish > ~/.config/fish/completions/orgwatch.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone, Debug)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Parses a date in YYYY-MM-DD or RFC3339 format.
///
/// A bare date means midnight UTC.
///
/// # Errors
///
/// Returns an error if the date format is invalid.
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(datetime.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        let datetime = date
            .and_hms_opt(0, 0, 0)
            .context(format!("Failed to create datetime from date {date_str}"))?;
        return Ok(datetime.and_utc());
    }

    anyhow::bail!("Invalid date format. Expected YYYY-MM-DD or RFC3339 format, got: {date_str}")
}

/// orgwatch - find repositories created in GitHub organizations since the last check.
#[derive(Parser)]
#[command(name = "orgwatch")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan organizations for repositories created since the last check
    Scan(ScanArgs),

    /// Inspect or reset the stored last check
    #[command(subcommand)]
    State(StateCommand),

    /// Generate shell completion scripts
    #[command(subcommand)]
    Completion(CompletionCommand),
}

/// Arguments for `orgwatch scan`.
#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// Organization to scan (repeatable; defaults to `watch.organizations` from config)
    #[arg(long = "org", value_name = "ORG")]
    pub orgs: Vec<String>,

    /// Report repositories created after this date (YYYY-MM-DD or RFC3339 format)
    #[arg(long, conflicts_with = "all")]
    pub since: Option<String>,

    /// Ignore the stored last check and report every repository
    #[arg(long)]
    pub all: bool,

    /// Do not update the stored last check
    #[arg(long)]
    pub dry_run: bool,
}

/// State subcommands
#[derive(Subcommand)]
pub enum StateCommand {
    /// Show the stored last check
    Show,

    /// Forget the stored last check so the next scan reports everything
    Reset,
}

/// Completion subcommands
#[derive(Subcommand)]
pub enum CompletionCommand {
    /// Generate completion script for a shell (output to stdout)
    #[command(after_long_help = COMPLETION_GENERATE_HELP)]
    Generate {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
