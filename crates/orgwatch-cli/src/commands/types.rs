// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Handlers return data instead of printing; `output` renders it.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use orgwatch_core::{ScanResult, ScanState};
use serde::Serialize;

/// Result from the scan command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanReport {
    /// Cutoff that was applied (`None` reports every repository).
    pub since: Option<DateTime<Utc>>,
    /// Repositories and per-organization outcomes.
    #[serde(flatten)]
    pub result: ScanResult,
    /// Whether the scan start was stored as the new last check.
    pub state_saved: bool,
    /// Whether `--dry-run` was given.
    pub dry_run: bool,
}

/// Result from `state show`.
#[derive(Debug, Clone, Serialize)]
pub struct StateShowResult {
    /// State file location.
    pub path: PathBuf,
    /// Stored state (default when the file does not exist).
    #[serde(flatten)]
    pub state: ScanState,
}

/// Result from `state reset`.
#[derive(Debug, Clone, Serialize)]
pub struct StateResetResult {
    /// State file that was removed.
    pub path: PathBuf,
}
