//! GitHub API mocks
//!
//! Stand-in for `api.github.com` backed by `wiremock`.

use serde_json::Value;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock GitHub API answering `username`'s repo listing with `repos`
pub async fn mock_github_repos(username: &str, repos: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{username}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos))
        .mount(&server)
        .await;
    // Anything else behaves like an unknown user
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

/// Start a mock GitHub API that answers every request only after `delay`
pub async fn mock_slow_github(delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(delay),
        )
        .mount(&server)
        .await;
    server
}
