//! Shared helpers for behavioural tests against a mock GitHub server.

use std::time::Duration;

use camino::Utf8PathBuf;
use gitbot::{ClientSettings, GitHubApi, PersonalAccessToken, QueryStore};
use url::Url;
use wiremock::MockServer;

/// Directory of the query templates shipped with the crate.
pub fn bundled_queries_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("queries")
}

/// Settings pointing both GitHub and the stats service at `server`.
///
/// # Panics
///
/// Panics if the mock server URI cannot be parsed.
pub fn settings_for(server: &MockServer) -> ClientSettings {
    let base = Url::parse(&server.uri())
        .unwrap_or_else(|error| panic!("mock server URI should parse: {error}"));
    ClientSettings {
        timeout: Duration::from_secs(5),
        ..ClientSettings::new(base.clone(), base)
    }
}

/// Builds a client with one credential per token, aimed at `server`.
///
/// Must be called from within a Tokio runtime.
///
/// # Panics
///
/// Panics if the bundled queries cannot be loaded or the client cannot be
/// built.
pub fn api_for(server: &MockServer, tokens: &[&str]) -> GitHubApi {
    let credentials = tokens
        .iter()
        .map(|token| {
            PersonalAccessToken::new(token)
                .unwrap_or_else(|error| panic!("token should be valid: {error}"))
        })
        .collect();
    let queries = QueryStore::load(&bundled_queries_dir())
        .unwrap_or_else(|error| panic!("bundled queries should load: {error}"));

    GitHubApi::connect(credentials, queries, settings_for(server))
        .unwrap_or_else(|error| panic!("client should build: {error}"))
}
