// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use console::style;
use orgwatch_core::{OrgStatus, RepositorySummary};

use super::Renderable;
use super::common::{format_since, format_timestamp, show_dry_run_message, truncate};
use crate::cli::OutputContext;
use crate::commands::types::ScanReport;
use crate::errors::failure_hint;

fn repository_table(repositories: &[RepositorySummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Repository", "Created", "Description"]);

    for repo in repositories {
        table.add_row(vec![
            repo.full_name(),
            format_timestamp(&repo.created_at),
            truncate(repo.description().unwrap_or_default(), 60),
        ]);
    }
    table
}

impl Renderable for ScanReport {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let found = self.result.repositories.len();

        writeln!(w)?;
        writeln!(
            w,
            "{}",
            style(format!(
                "{found} new {} since {}",
                if found == 1 { "repository" } else { "repositories" },
                format_since(self.since.as_ref())
            ))
            .bold()
        )?;

        if found > 0 {
            writeln!(w)?;
            writeln!(w, "{}", repository_table(&self.result.repositories))?;
        }

        if ctx.verbose || self.result.failed_count() > 0 {
            writeln!(w)?;
            for outcome in &self.result.organizations {
                match &outcome.status {
                    OrgStatus::Completed {
                        pages,
                        repositories,
                    } => writeln!(
                        w,
                        "  {} {} ({repositories} new, {pages} {})",
                        style("ok").green(),
                        outcome.organization,
                        if *pages == 1 { "page" } else { "pages" }
                    )?,
                    OrgStatus::Failed { kind, error } => {
                        writeln!(
                            w,
                            "  {} {}: {}",
                            style("failed").red(),
                            outcome.organization,
                            style(error).dim()
                        )?;
                        if let Some(hint) = failure_hint(*kind, error) {
                            writeln!(w, "    {} {hint}", style("Tip:").yellow())?;
                        }
                    }
                }
            }
        }

        writeln!(w)?;
        if self.dry_run {
            show_dry_run_message(w, "Dry run - last check not updated.")?;
        } else if self.state_saved {
            writeln!(
                w,
                "{}",
                style(format!(
                    "Last check set to {}",
                    format_timestamp(&self.result.scan_started_at)
                ))
                .dim()
            )?;
        } else {
            writeln!(
                w,
                "{}",
                style("Some organizations failed - last check not updated.").yellow()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use orgwatch_core::{FailureKind, OrgOutcome, ScanResult};
    use serde_json::json;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::render_to;

    fn ctx(format: OutputFormat) -> OutputContext {
        OutputContext {
            format,
            quiet: false,
            verbose: false,
            is_tty: false,
        }
    }

    fn report(state_saved: bool, dry_run: bool) -> ScanReport {
        let repo: RepositorySummary = serde_json::from_value(json!({
            "name": "fresh",
            "owner": { "login": "mozilla" },
            "created_at": "2024-06-10T12:00:00Z",
            "description": "A brand new project",
            "stargazers_count": 7
        }))
        .unwrap();

        ScanReport {
            since: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            result: ScanResult {
                repositories: vec![repo],
                scan_started_at: Utc.with_ymd_and_hms(2024, 6, 11, 9, 0, 0).unwrap(),
                organizations: vec![
                    OrgOutcome {
                        organization: "mozilla".to_string(),
                        status: OrgStatus::Completed {
                            pages: 1,
                            repositories: 1,
                        },
                    },
                    OrgOutcome {
                        organization: "gone".to_string(),
                        status: OrgStatus::Failed {
                            kind: FailureKind::Api,
                            error: "GitHub API error for gone on page 1: Not Found".to_string(),
                        },
                    },
                ],
            },
            state_saved,
            dry_run,
        }
    }

    fn rendered(report: &ScanReport, format: OutputFormat) -> String {
        let mut out = Vec::new();
        render_to(report, &ctx(format), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_lists_repositories_and_failures() {
        let text = rendered(&report(false, false), OutputFormat::Text);

        assert!(text.contains("1 new repository since 2024-06-01 00:00 UTC"));
        assert!(text.contains("mozilla/fresh"));
        assert!(text.contains("A brand new project"));
        assert!(text.contains("gone"));
        assert!(text.contains("Not Found"));
        assert!(text.contains("Tip:"));
        assert!(text.contains("can read this organization"));
        assert!(text.contains("last check not updated"));
    }

    #[test]
    fn test_text_dry_run_message() {
        let text = rendered(&report(false, true), OutputFormat::Text);
        assert!(text.contains("Dry run"));
    }

    #[test]
    fn test_json_keeps_raw_repository_fields() {
        let value: serde_json::Value =
            serde_json::from_str(&rendered(&report(true, false), OutputFormat::Json)).unwrap();

        assert_eq!(value["state_saved"], true);
        assert_eq!(value["repositories"][0]["name"], "fresh");
        assert_eq!(value["repositories"][0]["stargazers_count"], 7);
        assert_eq!(value["organizations"][1]["status"], "failed");
        assert_eq!(value["since"], "2024-06-01T00:00:00Z");
    }
}
