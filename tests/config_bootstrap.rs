//! Behavioural tests for building the client from configuration.

mod support;

use std::fs;

use camino::Utf8PathBuf;
use gitbot::{ApiError, GitHubApi, GitbotConfig};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::bundled_queries_dir;

fn config_for(server: &MockServer, queries_dir: &str) -> GitbotConfig {
    GitbotConfig {
        tokens: Some("token-alpha, token-beta".to_owned()),
        queries_dir: queries_dir.to_owned(),
        api_base: server.uri(),
        ghprofile_base: server.uri(),
        request_timeout_seconds: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn builds_one_credential_per_configured_token() {
    let server = MockServer::start().await;
    let config = config_for(&server, bundled_queries_dir().as_str());

    let api = GitHubApi::from_config(&config).expect("client should build");

    assert_eq!(api.credential_count(), 2);
    assert_eq!(api.settings().requester, "gitbot");
}

#[tokio::test]
async fn missing_query_directory_fails_construction() {
    let server = MockServer::start().await;
    let temp = TempDir::new().expect("temp dir should be created");
    let missing = Utf8PathBuf::from_path_buf(temp.path().join("absent"))
        .expect("temp path should be UTF-8");
    let config = config_for(&server, missing.as_str());

    let result = GitHubApi::from_config(&config);

    assert!(
        matches!(result, Err(ApiError::QueryDirectory { .. })),
        "expected QueryDirectory error, got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn incomplete_query_directory_fails_construction() {
    let server = MockServer::start().await;
    let temp = TempDir::new().expect("temp dir should be created");
    fs::write(temp.path().join("repo.graphql"), "query { viewer { login } }")
        .expect("template should be written");
    fs::write(temp.path().join("README.md"), "not a query").expect("file should be written");
    let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .expect("temp path should be UTF-8");
    let config = config_for(&server, dir.as_str());

    let result = GitHubApi::from_config(&config);

    assert!(
        matches!(result, Err(ApiError::MissingQuery { .. })),
        "expected MissingQuery error, got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn stats_are_fetched_from_the_configured_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/historic/view"))
        .and(query_param("username", "octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "payload": { "period": { "all_time": "42", "month": 7, "week": 3, "day": 1 } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let config = config_for(&server, bundled_queries_dir().as_str());
    let api = GitHubApi::from_config(&config).expect("client should build");

    let stats = api
        .ghprofile_stats("octocat")
        .await
        .expect("lookup should succeed")
        .expect("stats should be present");

    assert_eq!(stats.all_time, 42);
    assert_eq!(stats.total(), 53);
}
