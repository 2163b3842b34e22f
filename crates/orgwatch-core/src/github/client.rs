// SPDX-License-Identifier: Apache-2.0

//! REST client for the organization repository listing.
//!
//! Talks to `GET /orgs/{org}/repos` directly with reqwest so the raw body can
//! be inspected before it is trusted: GitHub reports bad credentials and rate
//! limits as a JSON object instead of the expected array.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Client;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{ACCEPT_MEDIA_TYPE, PER_PAGE, USER_AGENT};
use crate::config::GitHubConfig;
use crate::error::OrgWatchError;
use crate::scanner::RepositorySource;
use crate::types::RepositorySummary;

/// Characters escaped in the organization path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Authenticated client for the GitHub REST API.
///
/// Holds one reqwest connection pool for reuse across all pages and
/// organizations of a scan.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client with configured timeout and user agent.
    http: Client,
    /// API base URL without a trailing slash.
    base_url: String,
    /// Token sent as a bearer credential.
    token: SecretString,
}

impl GitHubClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `OrgWatchError::Transport` if the HTTP client cannot be built.
    pub fn new(token: SecretString, config: &GitHubConfig) -> crate::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Returns the API base URL in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repos_url(&self, org: &str) -> String {
        format!(
            "{}/orgs/{}/repos",
            self.base_url,
            utf8_percent_encode(org, PATH_SEGMENT)
        )
    }

    /// Fetches one page of an organization's repositories, newest first.
    ///
    /// # Errors
    ///
    /// - `Transport` if the request or body read fails
    /// - `Api` if GitHub answered with an error object
    /// - `MalformedResponse` if the body is not an array of repositories
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn list_org_repos(
        &self,
        org: &str,
        page: u32,
    ) -> crate::Result<Vec<RepositorySummary>> {
        let response = self
            .http
            .get(self.repos_url(org))
            .query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
                ("sort", "created".to_string()),
            ])
            .bearer_auth(self.token.expose_secret())
            .header(ACCEPT, ACCEPT_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "Received repository page"
        );

        parse_page(org, page, &body)
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_page(&self, org: &str, page: u32) -> crate::Result<Vec<RepositorySummary>> {
        self.list_org_repos(org, page).await
    }
}

fn malformed(org: &str, page: u32, detail: impl Into<String>) -> OrgWatchError {
    OrgWatchError::MalformedResponse {
        org: org.to_string(),
        page,
        detail: detail.into(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decodes a listing body into repository records.
///
/// Anything other than a JSON array is rejected. An object carrying both
/// `message` and `documentation_url` is GitHub's error shape and becomes
/// [`OrgWatchError::Api`]; every other shape is a `MalformedResponse`.
///
/// # Errors
///
/// See above.
pub fn parse_page(org: &str, page: u32, body: &[u8]) -> crate::Result<Vec<RepositorySummary>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| malformed(org, page, format!("invalid JSON: {e}")))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<RepositorySummary>(item)
                    .map_err(|e| malformed(org, page, format!("record {index}: {e}")))
            })
            .collect(),
        Value::Object(map) if map.contains_key("message") && map.contains_key("documentation_url") => {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            Err(OrgWatchError::Api {
                org: org.to_string(),
                page,
                message,
            })
        }
        other => Err(malformed(
            org,
            page,
            format!("expected a JSON array, got {}", json_kind(&other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::types::FailureKind;

    fn repo_json(name: &str, created_at: &str) -> Value {
        json!({
            "name": name,
            "owner": { "login": "mozilla" },
            "created_at": created_at,
            "html_url": format!("https://github.com/mozilla/{name}")
        })
    }

    fn client_for(server: &MockServer) -> GitHubClient {
        let config = GitHubConfig {
            api_url: server.uri(),
            api_timeout_seconds: 5,
        };
        GitHubClient::new(SecretString::from("test-token"), &config).expect("client")
    }

    #[test]
    fn test_parse_page_array() {
        let body = json!([
            repo_json("a", "2024-01-01T00:00:00Z"),
            repo_json("b", "2024-01-02T00:00:00Z")
        ])
        .to_string();

        let repos = parse_page("mozilla", 1, body.as_bytes()).expect("should parse");
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "a");
        assert_eq!(repos[1].name, "b");
    }

    #[test]
    fn test_parse_page_empty_array() {
        let repos = parse_page("mozilla", 3, b"[]").expect("should parse");
        assert!(repos.is_empty());
    }

    #[test]
    fn test_parse_page_error_object() {
        let body = json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })
        .to_string();

        let err = parse_page("mozilla", 1, body.as_bytes()).expect_err("should fail");
        match err {
            OrgWatchError::Api { org, page, message } => {
                assert_eq!(org, "mozilla");
                assert_eq!(page, 1);
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_page_object_without_documentation_url_is_malformed() {
        let body = json!({ "message": "Not Found" }).to_string();
        let err = parse_page("mozilla", 1, body.as_bytes()).expect_err("should fail");
        assert!(matches!(err, OrgWatchError::MalformedResponse { .. }));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_parse_page_null_is_malformed() {
        let err = parse_page("mozilla", 2, b"null").expect_err("should fail");
        assert!(matches!(
            err,
            OrgWatchError::MalformedResponse { page: 2, .. }
        ));
    }

    #[test]
    fn test_parse_page_empty_body_is_malformed() {
        let err = parse_page("mozilla", 1, b"").expect_err("should fail");
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_parse_page_bad_record_is_malformed() {
        let body = json!([
            repo_json("a", "2024-01-01T00:00:00Z"),
            { "name": "b", "owner": { "login": "mozilla" } }
        ])
        .to_string();

        let err = parse_page("mozilla", 1, body.as_bytes()).expect_err("should fail");
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn test_repos_url_escapes_org() {
        let client = GitHubClient::new(SecretString::from("t"), &GitHubConfig::default()).expect("client");
        assert_eq!(
            client.repos_url("my org"),
            "https://api.github.com/orgs/my%20org/repos"
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = GitHubConfig {
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            api_timeout_seconds: 5,
        };
        let client = GitHubClient::new(SecretString::from("t"), &config).expect("client");
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_list_org_repos_sends_expected_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/orgs/mozilla/repos"))
            .and(query_param("per_page", "100"))
            .and(query_param("page", "2"))
            .and(query_param("sort", "created"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("accept", ACCEPT_MEDIA_TYPE))
            .and(header("user-agent", USER_AGENT))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([repo_json("rust", "2024-05-01T00:00:00Z")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let repos = client_for(&server)
            .list_org_repos("mozilla", 2)
            .await
            .expect("request should succeed");

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].full_name(), "mozilla/rust");
    }

    #[tokio::test]
    async fn test_list_org_repos_maps_error_object() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/orgs/mozilla/repos"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_org_repos("mozilla", 1)
            .await
            .expect_err("should fail");

        assert_eq!(err.kind(), FailureKind::Api);
        assert!(err.to_string().contains("Bad credentials"));
    }

    #[tokio::test]
    async fn test_list_org_repos_transport_error() {
        let config = GitHubConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            api_timeout_seconds: 2,
        };
        let client = GitHubClient::new(SecretString::from("t"), &config).expect("client");

        let err = client
            .list_org_repos("mozilla", 1)
            .await
            .expect_err("should fail");

        assert!(matches!(err, OrgWatchError::Transport(_)));
    }
}
