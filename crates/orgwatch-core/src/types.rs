// SPDX-License-Identifier: Apache-2.0

//! Data types for repository scans.

use bon::Builder;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Owner of a repository as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    /// Login of the owning user or organization.
    pub login: String,
    /// Remaining owner fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A repository record from an organization listing.
///
/// Only the fields orgwatch reasons about are typed. Everything else the API
/// sent is kept in `extra` and written back out unchanged on serialization,
/// so downstream consumers see the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository name.
    pub name: String,
    /// Repository owner.
    pub owner: RepositoryOwner,
    /// When the repository was created.
    pub created_at: DateTime<Utc>,
    /// Remaining repository fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepositorySummary {
    /// Returns the full repository name in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }

    /// Returns the `html_url` field when the API provided one.
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        self.extra.get("html_url").and_then(Value::as_str)
    }

    /// Returns the `description` field when present and non-null.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.extra.get("description").and_then(Value::as_str)
    }

    /// True when this repository counts as new relative to `since`.
    ///
    /// The bound is exclusive; with no bound every repository is new.
    #[must_use]
    pub fn is_newer_than(&self, since: Option<DateTime<Utc>>) -> bool {
        since.is_none_or(|since| self.created_at > since)
    }
}

/// Input for a single scan.
#[derive(Debug, Clone, Builder)]
pub struct ScanRequest {
    /// Organization logins to scan.
    #[builder(default)]
    pub organizations: Vec<String>,
    /// GitHub token used for every request of the scan.
    pub credential: SecretString,
    /// Exclusive lower bound on repository creation time.
    pub since: Option<DateTime<Utc>>,
}

/// What went wrong with a failed organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// GitHub answered with an error object.
    Api,
    /// The body was not a list of repositories.
    MalformedResponse,
    /// The request never got an answer.
    Transport,
    /// Anything else.
    Other,
}

/// How one organization's fetch sequence ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OrgStatus {
    /// Paging finished normally.
    Completed {
        /// Number of pages requested.
        pages: u32,
        /// Number of repositories that passed the date filter.
        repositories: usize,
    },
    /// Paging aborted; the organization contributed nothing.
    Failed {
        /// Error classification.
        kind: FailureKind,
        /// Rendered error message.
        error: String,
    },
}

/// Per-organization result of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgOutcome {
    /// Organization login.
    pub organization: String,
    /// How the fetch sequence ended.
    #[serde(flatten)]
    pub status: OrgStatus,
}

impl OrgOutcome {
    /// Returns true if this organization's fetch sequence failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.status, OrgStatus::Failed { .. })
    }
}

/// Aggregated result of scanning several organizations.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// New repositories, grouped by organization in page order.
    pub repositories: Vec<RepositorySummary>,
    /// Captured once, before the first page request.
    pub scan_started_at: DateTime<Utc>,
    /// One entry per scanned organization.
    pub organizations: Vec<OrgOutcome>,
}

impl ScanResult {
    /// Number of organizations whose fetch failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.organizations.iter().filter(|o| o.is_failed()).count()
    }

    /// Iterates over failed organizations.
    pub fn failures(&self) -> impl Iterator<Item = &OrgOutcome> {
        self.organizations.iter().filter(|o| o.is_failed())
    }
}
