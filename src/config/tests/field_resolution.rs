//! Tests for field resolution methods (`resolve_tokens`, `client_settings`,
//! `queries_dir`, `require_repo`, `require_user`).

use std::time::Duration;

use rstest::rstest;

use crate::GitbotConfig;
use crate::github::error::ApiError;

fn token_values(config: &GitbotConfig) -> Result<Vec<String>, ApiError> {
    config.resolve_tokens().map(|tokens| {
        tokens
            .iter()
            .map(|token| token.value().to_owned())
            .collect()
    })
}

#[rstest]
#[case::single("alpha", &["alpha"])]
#[case::several("alpha,beta,gamma", &["alpha", "beta", "gamma"])]
#[case::whitespace_and_blanks(" alpha , ,beta,", &["alpha", "beta"])]
fn resolve_tokens_splits_comma_separated_values(#[case] raw: &str, #[case] expected: &[&str]) {
    let config = GitbotConfig {
        tokens: Some(raw.to_owned()),
        ..Default::default()
    };

    assert_eq!(
        token_values(&config).expect("tokens should resolve"),
        expected.to_vec(),
    );
}

#[rstest]
fn resolve_tokens_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = GitbotConfig::default();

    assert_eq!(
        token_values(&config).expect("legacy token should resolve"),
        vec!["legacy-token".to_owned()],
    );
}

#[rstest]
fn configured_tokens_take_precedence_over_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = GitbotConfig {
        tokens: Some("configured".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        token_values(&config).expect("tokens should resolve"),
        vec!["configured".to_owned()],
    );
}

#[rstest]
fn resolve_tokens_returns_error_when_none() {
    // Lock and clear GITHUB_TOKEN to ensure test isolation
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = GitbotConfig::default();

    assert_eq!(token_values(&config), Err(ApiError::NoCredentials));
}

#[rstest]
fn resolve_tokens_rejects_only_blank_entries() {
    let config = GitbotConfig {
        tokens: Some(" , ".to_owned()),
        ..Default::default()
    };

    assert_eq!(token_values(&config), Err(ApiError::NoCredentials));
}

#[rstest]
fn client_settings_reflect_configuration() {
    let config = GitbotConfig {
        requester: "my-bot".to_owned(),
        api_base: "https://ghe.example/api/v3".to_owned(),
        request_timeout_seconds: 5,
        archive_limit_bytes: 2048,
        ..Default::default()
    };

    let settings = config.client_settings().expect("settings should build");

    assert_eq!(settings.api_base.as_str(), "https://ghe.example/api/v3");
    assert_eq!(settings.ghprofile_base.host_str(), Some("api.ghprofile.me"));
    assert_eq!(settings.requester, "my-bot");
    assert_eq!(settings.timeout, Duration::from_secs(5));
    assert_eq!(settings.archive_limit, 2048);
}

#[rstest]
fn client_settings_reject_invalid_base() {
    let config = GitbotConfig {
        api_base: "not a url".to_owned(),
        ..Default::default()
    };

    let result = config.client_settings();
    assert!(
        matches!(result, Err(ApiError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
fn client_settings_reject_zero_timeout() {
    let config = GitbotConfig {
        request_timeout_seconds: 0,
        ..Default::default()
    };

    let result = config.client_settings();
    assert!(
        matches!(result, Err(ApiError::Configuration { .. })),
        "expected Configuration error, got {result:?}"
    );
}

#[rstest]
fn queries_dir_is_exposed_as_path() {
    let config = GitbotConfig {
        queries_dir: "assets/queries".to_owned(),
        ..Default::default()
    };

    assert_eq!(config.queries_dir().as_str(), "assets/queries");
    assert_eq!(config.queries_dir().file_name(), Some("queries"));
}

#[rstest]
fn require_repo_returns_value_when_present() {
    let config = GitbotConfig {
        repo: Some("octocat/hello-world".to_owned()),
        ..Default::default()
    };

    assert_eq!(config.require_repo().ok(), Some("octocat/hello-world"));
}

#[rstest]
fn require_selectors_return_error_when_missing() {
    let config = GitbotConfig::default();

    assert!(config.require_repo().is_err(), "repo should be required");
    assert!(config.require_user().is_err(), "user should be required");
}
