// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `OrgWatchError` and appends a hint for the
//! error kinds a user can act on. Per-organization scan failures arrive as
//! data rather than errors and get their hint from [`failure_hint`].

use anyhow::Error;
use orgwatch_core::FailureKind;
use orgwatch_core::error::OrgWatchError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not an `OrgWatchError`, returns the original error chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<OrgWatchError>() else {
        return format!("{error:#}");
    };

    match err {
        OrgWatchError::NotAuthenticated => {
            format!("{err}\n\nTip: Run `gh auth login`, or export GH_TOKEN with a token that can read the organizations.")
        }
        OrgWatchError::Transport(_) => {
            format!("{err}\n\nTip: Check your internet connection and try again.")
        }
        OrgWatchError::Config { .. } => {
            format!(
                "{err}\n\nTip: Check your config file at {}",
                orgwatch_core::config_file_path().display()
            )
        }
        OrgWatchError::State { .. } => {
            format!("{err}\n\nTip: Run `orgwatch state reset` to start over.")
        }
        _ => err.to_string(),
    }
}

/// Hint shown under an organization whose scan failed.
pub fn failure_hint(kind: FailureKind, error: &str) -> Option<&'static str> {
    match kind {
        FailureKind::Api if error.contains("rate limit") => {
            Some("Wait for the rate limit window to reset and try again.")
        }
        FailureKind::Api => Some(
            "Check that your GitHub token is valid, not expired, and can read this organization.",
        ),
        FailureKind::MalformedResponse => Some("Check `github.api_url` in your config file."),
        FailureKind::Transport => Some("Check your internet connection and try again."),
        FailureKind::Other => None,
    }
}
