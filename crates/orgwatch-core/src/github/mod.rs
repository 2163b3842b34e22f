// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides token resolution and the REST client that lists organization
//! repositories.

pub mod auth;
pub mod client;

pub use client::{GitHubClient, parse_page};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested from the listing endpoint (the API maximum).
pub const PER_PAGE: usize = 100;

/// Media type requested through the `Accept` header.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// `User-Agent` sent with every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("orgwatch/", env!("CARGO_PKG_VERSION"));
