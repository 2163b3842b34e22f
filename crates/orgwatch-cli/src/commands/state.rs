// SPDX-License-Identifier: Apache-2.0

//! State commands: show or forget the stored last check.

use anyhow::Result;
use orgwatch_core::{AppConfig, state};

use super::types::{StateResetResult, StateShowResult};

/// Load the stored last check.
pub fn run_show(config: &AppConfig) -> Result<StateShowResult> {
    let path = config.state.resolved_path();
    let state = state::load(&path)?;
    Ok(StateShowResult { path, state })
}

/// Delete the state file.
pub fn run_reset(config: &AppConfig) -> Result<StateResetResult> {
    let path = config.state.resolved_path();
    state::reset(&path)?;
    Ok(StateResetResult { path })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use orgwatch_core::ScanState;

    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.state.path = Some(dir.path().join("state.json"));
        config
    }

    #[test]
    fn test_show_without_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_show(&config_in(&dir)).unwrap();

        assert!(result.state.last_check.is_none());
        assert_eq!(result.path, dir.path().join("state.json"));
    }

    #[test]
    fn test_reset_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let stored = ScanState {
            last_check: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            last_repository_count: 3,
        };
        state::save(&config.state.resolved_path(), &stored).unwrap();

        assert_eq!(run_show(&config).unwrap().state, stored);

        run_reset(&config).unwrap();
        assert_eq!(run_show(&config).unwrap().state, ScanState::default());
    }
}
