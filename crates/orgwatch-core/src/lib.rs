// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # orgwatch core
//!
//! Core library for orgwatch: find repositories created in GitHub
//! organizations since the last check.
//!
//! This crate provides:
//! - A concurrent, paginating scanner over organization repository listings
//! - The GitHub REST client it runs on
//! - Configuration management
//! - Persistence of the last-check timestamp
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orgwatch_core::{GitHubConfig, RepositoryScanner};
//! use secrecy::SecretString;
//!
//! # async fn example() -> orgwatch_core::Result<()> {
//! let token = SecretString::from("ghp_example".to_string());
//! let scanner = RepositoryScanner::github(token, &GitHubConfig::default())?;
//!
//! let orgs = vec!["mozilla".to_string(), "rust-lang".to_string()];
//! let result = scanner.scan(&orgs, None).await;
//!
//! for repo in &result.repositories {
//!     println!("{} created {}", repo.full_name(), repo.created_at);
//! }
//! println!("scan started at {:?}", scanner.latest_run_start_date());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub token resolution and REST client
//! - [`scanner`] - Multi-organization scan and pagination
//! - [`state`] - Last-check persistence

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{StaticTokenProvider, TokenProvider};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::OrgWatchError;

/// Convenience Result type for orgwatch operations.
///
/// This is equivalent to `std::result::Result<T, OrgWatchError>`.
pub type Result<T> = std::result::Result<T, OrgWatchError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, GitHubConfig, StateConfig, WatchConfig, config_dir, config_file_path, data_dir,
    load_config,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::GitHubClient;
pub use github::auth::{TokenSource, resolve_token};

// ============================================================================
// Scanning
// ============================================================================

pub use scanner::{RepositoryScanner, RepositorySource};
pub use types::{
    FailureKind, OrgOutcome, OrgStatus, RepositoryOwner, RepositorySummary, ScanRequest, ScanResult,
};

// ============================================================================
// State
// ============================================================================

pub use state::ScanState;

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{scan_organizations, scan_request};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod scanner;
pub mod state;
pub mod types;
