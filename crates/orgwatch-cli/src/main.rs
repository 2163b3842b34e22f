// SPDX-License-Identifier: Apache-2.0

//! orgwatch - report repositories created in GitHub organizations since the
//! last check.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

pub use provider::CliTokenProvider;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use orgwatch_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let result = match config::load_config().context("Failed to load configuration") {
        Ok(config) => {
            debug!(?config, "Configuration loaded");
            commands::run(cli.command, output_ctx, &config).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
