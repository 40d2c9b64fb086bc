/**
 * GitHub Client
 *
 * Read-through proxy for a user's most recent public repositories. The
 * upstream JSON is passed to the client unchanged.
 */
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::shared::config::AppConfig;

const USER_AGENT: &str = concat!("devconnect/", env!("CARGO_PKG_VERSION"));
const REPO_COUNT: u32 = 5;
/// GitHub's own limit on login length
const MAX_USERNAME_LEN: usize = 39;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("invalid GitHub username: {0:?}")]
    InvalidUsername(String),

    /// Upstream answered with anything but 200
    #[error("GitHub returned status {status}")]
    NotFound { status: u16 },

    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GithubError> {
        Self::new(
            config.github_api_url.clone(),
            config.github_token.clone(),
            config.github_timeout,
        )
    }

    /// Fetch the five most recently created repositories of `username`
    pub async fn recent_repos(&self, username: &str) -> Result<Value, GithubError> {
        if !is_valid_username(username) {
            return Err(GithubError::InvalidUsername(username.to_string()));
        }

        let url = format!("{}/users/{}/repos", self.base_url, username);
        let mut request = self.http.get(&url).query(&[
            ("per_page", REPO_COUNT.to_string()),
            ("sort", "created".to_string()),
            ("direction", "asc".to_string()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("Fetching GitHub repos for {}", username);
        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            return Err(GithubError::NotFound {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Alphanumerics and single inner hyphens
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && !username.starts_with('-')
        && !username.ends_with('-')
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, token: Option<&str>) -> GithubClient {
        GithubClient::new(server.uri(), token.map(String::from), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_username_rules() {
        assert!(is_valid_username("octocat"));
        assert!(is_valid_username("rust-lang"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("-leading"));
        assert!(!is_valid_username("../../etc"));
        assert!(!is_valid_username("a/b"));
        assert!(!is_valid_username(&"a".repeat(40)));
    }

    #[tokio::test]
    async fn test_recent_repos_passthrough() {
        let server = MockServer::start().await;
        let repos = json!([{ "name": "hello-world", "stargazers_count": 3 }]);
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .and(query_param("per_page", "5"))
            .and(query_param("sort", "created"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repos.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server, None).recent_repos("octocat").await.unwrap();
        assert_eq!(result, repos);
    }

    #[tokio::test]
    async fn test_token_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server, Some("s3cret")).recent_repos("octocat").await.unwrap();
        assert_eq!(result, json!([]));
    }

    #[tokio::test]
    async fn test_non_200_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert_matches!(
            client(&server, None).recent_repos("nobody").await,
            Err(GithubError::NotFound { status: 404 })
        );
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = GithubClient::new(server.uri(), None, Duration::from_millis(100)).unwrap();
        assert_matches!(
            client.recent_repos("octocat").await,
            Err(GithubError::Http(e)) if e.is_timeout()
        );
    }

    #[tokio::test]
    async fn test_invalid_username_never_hits_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert_matches!(
            client(&server, None).recent_repos("bad/name").await,
            Err(GithubError::InvalidUsername(_))
        );
    }
}
