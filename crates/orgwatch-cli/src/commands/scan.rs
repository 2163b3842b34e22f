// SPDX-License-Identifier: Apache-2.0

//! Scan command: report repositories created since the last check.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use orgwatch_core::auth::TokenProvider;
use orgwatch_core::{AppConfig, ScanState, scan_organizations, state};
use tracing::{debug, info};

use super::types::ScanReport;
use crate::cli::{ScanArgs, parse_date};

/// Organizations from `--org`, falling back to `watch.organizations`.
///
/// # Errors
///
/// Returns an error when neither source names an organization.
pub fn resolve_organizations(args: &ScanArgs, config: &AppConfig) -> Result<Vec<String>> {
    let orgs = if args.orgs.is_empty() {
        config.watch.organizations.clone()
    } else {
        args.orgs.clone()
    };

    if orgs.is_empty() {
        anyhow::bail!(
            "No organizations to scan. Pass --org or set `organizations` under [watch] in {}",
            orgwatch_core::config_file_path().display()
        );
    }
    Ok(orgs)
}

/// Cutoff for the scan: `--since`, nothing with `--all`, otherwise the stored last check.
///
/// # Errors
///
/// Returns an error if `--since` does not parse.
pub fn resolve_since(args: &ScanArgs, stored: &ScanState) -> Result<Option<DateTime<Utc>>> {
    if let Some(since) = &args.since {
        return parse_date(since).map(Some);
    }
    if args.all {
        return Ok(None);
    }
    Ok(stored.last_check)
}

/// Run the scan and, unless told otherwise, advance the stored last check.
///
/// The last check only moves when every organization completed; a failed
/// organization would otherwise lose its new repositories for good.
pub async fn run(
    args: ScanArgs,
    config: &AppConfig,
    provider: &dyn TokenProvider,
) -> Result<ScanReport> {
    let organizations = resolve_organizations(&args, config)?;
    let state_path = config.state.resolved_path();
    let mut stored = state::load(&state_path)?;
    let since = resolve_since(&args, &stored)?;

    debug!(
        organizations = organizations.len(),
        since = ?since,
        "Starting scan"
    );

    let result = scan_organizations(provider, &config.github, organizations, since).await?;

    let state_saved = !args.dry_run && result.failed_count() == 0;
    if state_saved {
        stored.record(&result);
        state::save(&state_path, &stored).context("Failed to save last check")?;
        info!(last_check = %result.scan_started_at, "Stored last check");
    }

    Ok(ScanReport {
        since,
        result,
        state_saved,
        dry_run: args.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use orgwatch_core::StaticTokenProvider;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn args() -> ScanArgs {
        ScanArgs {
            orgs: Vec::new(),
            since: None,
            all: false,
            dry_run: false,
        }
    }

    fn stored() -> ScanState {
        ScanState {
            last_check: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            last_repository_count: 2,
        }
    }

    #[test]
    fn test_resolve_organizations_prefers_flags() {
        let mut config = AppConfig::default();
        config.watch.organizations = vec!["servo".to_string()];
        let args = ScanArgs {
            orgs: vec!["mozilla".to_string()],
            ..args()
        };

        assert_eq!(resolve_organizations(&args, &config).unwrap(), vec!["mozilla"]);
    }

    #[test]
    fn test_resolve_organizations_falls_back_to_config() {
        let mut config = AppConfig::default();
        config.watch.organizations = vec!["servo".to_string(), "rust-lang".to_string()];

        assert_eq!(
            resolve_organizations(&args(), &config).unwrap(),
            vec!["servo", "rust-lang"]
        );
    }

    #[test]
    fn test_resolve_organizations_requires_one() {
        let err = resolve_organizations(&args(), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No organizations to scan"));
    }

    #[test]
    fn test_resolve_since_uses_stored_last_check() {
        assert_eq!(resolve_since(&args(), &stored()).unwrap(), stored().last_check);
    }

    #[test]
    fn test_resolve_since_all_ignores_state() {
        let args = ScanArgs { all: true, ..args() };
        assert_eq!(resolve_since(&args, &stored()).unwrap(), None);
    }

    #[test]
    fn test_resolve_since_flag_wins() {
        let args = ScanArgs {
            since: Some("2024-06-01".to_string()),
            ..args()
        };
        assert_eq!(
            resolve_since(&args, &stored()).unwrap(),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_resolve_since_fresh_state_reports_everything() {
        assert_eq!(resolve_since(&args(), &ScanState::default()).unwrap(), None);
    }

    fn config_for(server: &MockServer, state_dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.github.api_url = server.uri();
        config.state.path = Some(state_dir.path().join("state.json"));
        config
    }

    fn provider() -> StaticTokenProvider {
        StaticTokenProvider::new(SecretString::from("token"))
    }

    async fn mount_repos(server: &MockServer, org: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/orgs/{org}/repos")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "name": "fresh",
                    "owner": { "login": org },
                    "created_at": "2024-06-10T00:00:00Z"
                }
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_run_saves_last_check() {
        let server = MockServer::start().await;
        mount_repos(&server, "mozilla").await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);

        let args = ScanArgs {
            orgs: vec!["mozilla".to_string()],
            ..args()
        };
        let report = run(args, &config, &provider()).await.unwrap();

        assert!(report.state_saved);
        assert_eq!(report.result.repositories.len(), 1);

        let saved = state::load(&config.state.resolved_path()).unwrap();
        assert_eq!(saved.last_check, Some(report.result.scan_started_at));
        assert_eq!(saved.last_repository_count, 1);
    }

    #[tokio::test]
    async fn test_run_dry_run_leaves_state_alone() {
        let server = MockServer::start().await;
        mount_repos(&server, "mozilla").await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);

        let args = ScanArgs {
            orgs: vec!["mozilla".to_string()],
            dry_run: true,
            ..args()
        };
        let report = run(args, &config, &provider()).await.unwrap();

        assert!(report.dry_run);
        assert!(!report.state_saved);
        assert!(!config.state.resolved_path().exists());
    }

    #[tokio::test]
    async fn test_run_with_failed_org_keeps_previous_last_check() {
        let server = MockServer::start().await;
        mount_repos(&server, "mozilla").await;
        Mock::given(method("GET"))
            .and(path("/orgs/gone/repos"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);
        state::save(&config.state.resolved_path(), &stored()).unwrap();

        let args = ScanArgs {
            orgs: vec!["mozilla".to_string(), "gone".to_string()],
            ..args()
        };
        let report = run(args, &config, &provider()).await.unwrap();

        assert!(!report.state_saved);
        assert_eq!(report.since, stored().last_check);
        assert_eq!(report.result.failed_count(), 1);
        assert_eq!(report.result.repositories.len(), 1);
        assert_eq!(state::load(&config.state.resolved_path()).unwrap(), stored());
    }
}
