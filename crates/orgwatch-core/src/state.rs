// SPDX-License-Identifier: Apache-2.0

//! Last-check state persisted between runs.
//!
//! Stored as JSON in `~/.local/share/orgwatch/state.json` by default. The
//! scanner itself is stateless; front ends load the previous `last_check`
//! before a scan and record the scan's start time afterwards.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OrgWatchError;
use crate::types::ScanResult;

/// Persisted scan bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanState {
    /// Start time of the last recorded scan. Next scan reports only newer repositories.
    #[serde(default)]
    pub last_check: Option<DateTime<Utc>>,
    /// Number of repositories the last recorded scan reported.
    #[serde(default)]
    pub last_repository_count: usize,
}

impl ScanState {
    /// Records a finished scan.
    ///
    /// Uses the scan's start time rather than its end time, so repositories
    /// created while the scan was running are picked up next time.
    pub fn record(&mut self, result: &ScanResult) {
        self.last_check = Some(result.scan_started_at);
        self.last_repository_count = result.repositories.len();
    }
}

fn state_error(action: &str, path: &Path, e: impl std::fmt::Display) -> OrgWatchError {
    OrgWatchError::State {
        message: format!("Failed to {action} state file {}: {e}", path.display()),
    }
}

/// Load scan state from disk.
///
/// Returns the default state if the file doesn't exist.
pub fn load(path: &Path) -> crate::Result<ScanState> {
    if !path.exists() {
        debug!(path = %path.display(), "No state file, starting fresh");
        return Ok(ScanState::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| state_error("read", path, e))?;
    let state: ScanState =
        serde_json::from_str(&contents).map_err(|e| state_error("parse", path, e))?;

    debug!(path = %path.display(), last_check = ?state.last_check, "Loaded state");
    Ok(state)
}

/// Save scan state to disk.
///
/// Creates parent directories if they don't exist. The file is written next
/// to `path` and renamed over it, so a crash never leaves a truncated state.
pub fn save(path: &Path, state: &ScanState) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| state_error("create directory for", path, e))?;
    }

    let contents =
        serde_json::to_string_pretty(state).map_err(|e| state_error("serialize", path, e))?;

    // Atomic write: write to temp file, then rename
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, contents).map_err(|e| state_error("write", &temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| state_error("replace", path, e))?;

    debug!(path = %path.display(), "Saved state");
    Ok(())
}

/// Delete the state file so the next scan reports everything.
///
/// A missing file is not an error.
pub fn reset(path: &Path) -> crate::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(state_error("delete", path, e)),
    }
}
