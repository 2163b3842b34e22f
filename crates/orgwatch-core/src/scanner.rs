// SPDX-License-Identifier: Apache-2.0

//! Repository scanning across organizations.
//!
//! Each organization is paged independently, newest repositories first, until
//! either the listing runs out or a page reaches past the `since` boundary.
//! Organizations are scanned concurrently on the current task and joined at
//! the end; a failing organization is logged and reported in the result but
//! never fails the scan as a whole.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use secrecy::SecretString;
use tracing::{debug, info, instrument, warn};

use crate::config::GitHubConfig;
use crate::github::{GitHubClient, PER_PAGE};
use crate::types::{OrgOutcome, OrgStatus, RepositorySummary, ScanResult};

/// Source of repository listing pages.
///
/// Implemented by [`GitHubClient`]; tests substitute in-memory sources.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetches page `page` (1-based) of `org`'s repositories.
    async fn fetch_page(&self, org: &str, page: u32) -> crate::Result<Vec<RepositorySummary>>;
}

/// Decides whether another page must be requested.
///
/// Only a full page whose every record passed the date filter can be
/// followed by more new repositories.
#[must_use]
pub fn should_fetch_next(fetched: usize, kept: usize) -> bool {
    fetched == PER_PAGE && kept == fetched
}

/// Repositories collected for one organization.
#[derive(Debug)]
struct OrgScan {
    repositories: Vec<RepositorySummary>,
    pages: u32,
}

/// Scans organizations for repositories created after a given instant.
#[derive(Debug)]
pub struct RepositoryScanner<S> {
    /// Where pages come from.
    source: S,
    /// Start of the most recent scan.
    latest_run: Mutex<Option<DateTime<Utc>>>,
}

impl RepositoryScanner<GitHubClient> {
    /// Creates a scanner backed by the GitHub REST API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn github(token: SecretString, config: &GitHubConfig) -> crate::Result<Self> {
        Ok(Self::new(GitHubClient::new(token, config)?))
    }
}

impl<S: RepositorySource> RepositoryScanner<S> {
    /// Creates a scanner over an arbitrary page source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            latest_run: Mutex::new(None),
        }
    }

    /// Returns the page source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns when the most recent [`scan`](Self::scan) started.
    ///
    /// `None` until the first scan begins.
    #[must_use]
    pub fn latest_run_start_date(&self) -> Option<DateTime<Utc>> {
        *self
            .latest_run
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Scans every organization and aggregates the new repositories.
    ///
    /// Duplicate organization names are scanned once. The returned
    /// repositories are grouped per organization, in request order, each
    /// organization's pages in ascending order. This never fails: per
    /// organization errors are logged and recorded in
    /// [`ScanResult::organizations`].
    #[instrument(skip(self, organizations), fields(organizations = organizations.len(), since = ?since))]
    pub async fn scan(&self, organizations: &[String], since: Option<DateTime<Utc>>) -> ScanResult {
        let scan_started_at = Utc::now();
        *self
            .latest_run
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(scan_started_at);

        let mut seen = HashSet::new();
        let unique: Vec<&str> = organizations
            .iter()
            .map(String::as_str)
            .filter(|org| seen.insert(*org))
            .collect();

        let outcomes = join_all(unique.iter().map(|org| async move {
            (*org, self.scan_organization(org, since).await)
        }))
        .await;

        let mut result = ScanResult {
            repositories: Vec::new(),
            scan_started_at,
            organizations: Vec::with_capacity(outcomes.len()),
        };

        for (org, outcome) in outcomes {
            let status = match outcome {
                Ok(scan) => {
                    let status = OrgStatus::Completed {
                        pages: scan.pages,
                        repositories: scan.repositories.len(),
                    };
                    result.repositories.extend(scan.repositories);
                    status
                }
                Err(e) => {
                    warn!(org = %org, error = %e, "Organization scan failed");
                    OrgStatus::Failed {
                        kind: e.kind(),
                        error: e.to_string(),
                    }
                }
            };
            result.organizations.push(OrgOutcome {
                organization: org.to_string(),
                status,
            });
        }

        info!(
            found = result.repositories.len(),
            failed = result.failed_count(),
            "Scan complete"
        );
        result
    }

    /// Pages through one organization until the stop rule fires.
    async fn scan_organization(
        &self,
        org: &str,
        since: Option<DateTime<Utc>>,
    ) -> crate::Result<OrgScan> {
        debug!(org, "Start scanning organization");

        let mut repositories = Vec::new();
        let mut page = 1;

        loop {
            let records = self.source.fetch_page(org, page).await?;
            let fetched = records.len();
            let before = repositories.len();
            repositories.extend(records.into_iter().filter(|r| r.is_newer_than(since)));
            let kept = repositories.len() - before;

            debug!(org, page, fetched, kept, "Processed page");

            if !should_fetch_next(fetched, kept) {
                return Ok(OrgScan {
                    repositories,
                    pages: page,
                });
            }

            debug!(org, "Full page of new repositories, fetching more");
            page += 1;
        }
    }
}
