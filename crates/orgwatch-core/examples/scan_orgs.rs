// SPDX-License-Identifier: Apache-2.0

//! Scan organizations with a custom `TokenProvider`.
//!
//! Run with: `GITHUB_TOKEN=... cargo run --example scan_orgs -p orgwatch-core -- mozilla rust-lang`

use orgwatch_core::{GitHubConfig, TokenProvider, scan_organizations};
use secrecy::SecretString;

/// Reads the token from `GITHUB_TOKEN` only.
struct EnvProvider;

impl TokenProvider for EnvProvider {
    fn github_token(&self) -> Option<SecretString> {
        std::env::var("GITHUB_TOKEN").ok().map(SecretString::from)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let orgs: Vec<String> = std::env::args().skip(1).collect();
    let since = chrono::Utc::now() - chrono::Duration::days(30);

    let result = scan_organizations(&EnvProvider, &GitHubConfig::default(), orgs, Some(since)).await?;

    println!("{} repositories created in the last 30 days:", result.repositories.len());
    for repo in &result.repositories {
        println!("  - {} ({})", repo.full_name(), repo.created_at);
    }
    for failed in result.failures() {
        println!("  ! {} failed", failed.organization);
    }

    Ok(())
}
