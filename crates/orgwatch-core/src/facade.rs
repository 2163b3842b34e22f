// SPDX-License-Identifier: Apache-2.0

//! High-level entry points for front ends.
//!
//! These functions hide client construction. Front ends either hand over a
//! complete [`ScanRequest`] or implement `TokenProvider` and let the facade
//! resolve the credential.

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::auth::TokenProvider;
use crate::config::GitHubConfig;
use crate::error::OrgWatchError;
use crate::scanner::RepositoryScanner;
use crate::types::{ScanRequest, ScanResult};

/// Runs a scan described by a [`ScanRequest`].
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built. Per
/// organization failures are reported inside the [`ScanResult`].
#[instrument(skip(request, config), fields(organizations = request.organizations.len(), since = ?request.since))]
pub async fn scan_request(
    request: &ScanRequest,
    config: &GitHubConfig,
) -> crate::Result<ScanResult> {
    let scanner = RepositoryScanner::github(request.credential.clone(), config)?;
    Ok(scanner.scan(&request.organizations, request.since).await)
}

/// Scans organizations using the GitHub token from `provider`.
///
/// # Errors
///
/// Returns `OrgWatchError::NotAuthenticated` if the provider has no token.
#[instrument(skip(provider, config, organizations), fields(organizations = organizations.len()))]
pub async fn scan_organizations(
    provider: &dyn TokenProvider,
    config: &GitHubConfig,
    organizations: Vec<String>,
    since: Option<DateTime<Utc>>,
) -> crate::Result<ScanResult> {
    let credential = provider
        .github_token()
        .ok_or(OrgWatchError::NotAuthenticated)?;

    let request = ScanRequest::builder()
        .organizations(organizations)
        .credential(credential)
        .maybe_since(since)
        .build();

    scan_request(&request, config).await
}
