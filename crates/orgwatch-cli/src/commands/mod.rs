// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the orgwatch CLI.

pub mod completion;
pub mod scan;
pub mod state;
pub mod types;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use orgwatch_core::AppConfig;

use crate::CliTokenProvider;
use crate::cli::{Commands, CompletionCommand, OutputContext, StateCommand};
use crate::output;
use types::ScanReport;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }

    let s = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
    {
        s.set_style(spinner_style);
    }
    s.set_message(message.to_string());
    s.enable_steady_tick(Duration::from_millis(100));
    Some(s)
}

/// Fails when any organization could not be scanned, so the exit code
/// reflects partial results.
fn ensure_complete(report: &ScanReport) -> Result<()> {
    let failed = report.result.failed_count();
    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} organizations could not be scanned",
            report.result.organizations.len()
        );
    }
    Ok(())
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Scan(args) => {
            let spinner = maybe_spinner(&ctx, "Scanning organizations...");
            let result = scan::run(args, config, &CliTokenProvider).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            let report = result?;
            output::render(&report, &ctx)?;
            ensure_complete(&report)
        }

        Commands::State(state_cmd) => match state_cmd {
            StateCommand::Show => output::render(&state::run_show(config)?, &ctx),
            StateCommand::Reset => output::render(&state::run_reset(config)?, &ctx),
        },

        Commands::Completion(CompletionCommand::Generate { shell }) => {
            completion::run_generate(shell)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use orgwatch_core::{FailureKind, OrgOutcome, OrgStatus, ScanResult};

    use super::*;

    fn report(statuses: Vec<OrgStatus>) -> ScanReport {
        ScanReport {
            since: None,
            result: ScanResult {
                repositories: Vec::new(),
                scan_started_at: Utc::now(),
                organizations: statuses
                    .into_iter()
                    .enumerate()
                    .map(|(i, status)| OrgOutcome {
                        organization: format!("org{i}"),
                        status,
                    })
                    .collect(),
            },
            state_saved: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_ensure_complete_accepts_all_completed() {
        let report = report(vec![OrgStatus::Completed {
            pages: 1,
            repositories: 0,
        }]);
        assert!(ensure_complete(&report).is_ok());
    }

    #[test]
    fn test_ensure_complete_rejects_failed_org() {
        let report = report(vec![
            OrgStatus::Completed {
                pages: 1,
                repositories: 0,
            },
            OrgStatus::Failed {
                kind: FailureKind::Api,
                error: "Bad credentials".to_string(),
            },
        ]);
        let err = ensure_complete(&report).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 organizations could not be scanned");
    }
}
