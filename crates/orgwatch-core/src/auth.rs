// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for credential resolution.
//!
//! The scanner never looks up credentials itself. Front ends implement
//! `TokenProvider` and hand it to the facade functions, which keeps the
//! library usable from contexts where environment variables or the `gh`
//! CLI are not the source of truth.

use secrecy::SecretString;

/// Provides the GitHub credential used for API calls.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    ///
    /// Returns `None` if no token is available from any source.
    fn github_token(&self) -> Option<SecretString>;
}

/// A provider that always returns the same token.
///
/// Handy when the caller already holds the credential.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    /// Wraps an existing token.
    #[must_use]
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        Some(self.token.clone())
    }
}
