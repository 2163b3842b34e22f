// SPDX-License-Identifier: Apache-2.0

//! Error types for orgwatch.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

use crate::types::FailureKind;

/// Errors that can occur during orgwatch operations.
#[derive(Error, Debug)]
pub enum OrgWatchError {
    /// The repository listing was not a JSON array of repository records.
    #[error("Malformed response for {org} on page {page}: {detail}")]
    MalformedResponse {
        /// Organization being listed.
        org: String,
        /// Page number that produced the body.
        page: u32,
        /// What was wrong with the body.
        detail: String,
    },

    /// GitHub answered with an error object (`message` + `documentation_url`).
    ///
    /// Usually bad credentials or an exhausted rate limit.
    #[error("GitHub API error for {org} on page {page}: {message}")]
    Api {
        /// Organization being listed.
        org: String,
        /// Page number that produced the error.
        page: u32,
        /// The `message` field of the error object.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// User is not authenticated - needs a GitHub token.
    #[error(
        "Authentication required - set GH_TOKEN or GITHUB_TOKEN, or log in with `gh auth login`"
    )]
    NotAuthenticated,

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Last-check state file could not be read or written.
    #[error("State error: {message}")]
    State {
        /// Error message.
        message: String,
    },
}

impl OrgWatchError {
    /// Classifies the error for per-organization reporting.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            OrgWatchError::Api { .. } => FailureKind::Api,
            OrgWatchError::MalformedResponse { .. } => FailureKind::MalformedResponse,
            OrgWatchError::Transport(_) => FailureKind::Transport,
            _ => FailureKind::Other,
        }
    }
}

impl From<config::ConfigError> for OrgWatchError {
    fn from(err: config::ConfigError) -> Self {
        OrgWatchError::Config {
            message: err.to_string(),
        }
    }
}
