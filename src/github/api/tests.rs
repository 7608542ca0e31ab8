//! Unit tests for the lookup façade against mocked gateways.

use chrono::{TimeZone, Utc};
use mockall::predicate::always;
use rstest::rstest;
use serde_json::{Value, json};

use super::{ClientSettings, DEFAULT_LAST, GitHubApi, contribution_window};
use crate::github::error::ApiError;
use crate::github::gateway::MockGitHubGateway;
use crate::github::locator::PersonalAccessToken;
use crate::github::models::{IssueState, Lookup, PullRequestState};
use crate::github::queries::{QueryStore, REQUIRED_QUERIES};
use crate::github::test_support::{
    issue_data, issue_list_data, pull_request_data, pull_request_list_data, repository_data,
    user_data,
};

fn templates() -> QueryStore {
    QueryStore::from_templates(
        REQUIRED_QUERIES
            .iter()
            .map(|name| (*name, format!("query {name}"))),
    )
}

fn api_with(gateways: Vec<MockGitHubGateway>) -> GitHubApi<MockGitHubGateway> {
    let credentials = gateways
        .into_iter()
        .enumerate()
        .map(|(index, gateway)| {
            let token =
                PersonalAccessToken::new(format!("token-{index}")).expect("token should be valid");
            (token, gateway)
        })
        .collect();
    let settings = ClientSettings::public_github().expect("default settings should parse");
    GitHubApi::with_gateways(credentials, templates(), settings).expect("api should build")
}

fn api_answering_graphql(
    expected_query: &'static str,
    answer: Result<Value, ApiError>,
) -> GitHubApi<MockGitHubGateway> {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_graphql()
        .withf(move |query, _| query == format!("query {expected_query}"))
        .times(1)
        .returning(move |_, _| answer.clone());
    api_with(vec![gateway])
}

fn api_answering_rest(
    expected_route: &'static str,
    answer: Result<Value, ApiError>,
) -> GitHubApi<MockGitHubGateway> {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_rest_get()
        .withf(move |route| route == expected_route)
        .times(1)
        .returning(move |_| answer.clone());
    api_with(vec![gateway])
}

fn not_found() -> ApiError {
    ApiError::NotFound {
        status: 404,
        message: "Not Found".to_owned(),
    }
}

fn server_error() -> ApiError {
    ApiError::Api {
        message: "status 500".to_owned(),
    }
}

fn query_error(message: &str) -> ApiError {
    ApiError::Query {
        message: message.to_owned(),
    }
}

// Construction

#[rstest]
fn construction_requires_a_credential() {
    let settings = ClientSettings::public_github().expect("default settings should parse");
    let result = GitHubApi::<MockGitHubGateway>::with_gateways(Vec::new(), templates(), settings);
    assert!(
        matches!(result, Err(ApiError::NoCredentials)),
        "expected NoCredentials"
    );
}

#[rstest]
fn construction_requires_every_query_template() {
    let settings = ClientSettings::public_github().expect("default settings should parse");
    let token = PersonalAccessToken::new("token").expect("token should be valid");
    let partial = QueryStore::from_templates([("repo", "query repo")]);

    let result = GitHubApi::with_gateways(vec![(token, MockGitHubGateway::new())], partial, settings);

    assert!(
        matches!(result, Err(ApiError::MissingQuery { .. })),
        "expected MissingQuery"
    );
}

// Rotation

#[tokio::test]
async fn requests_rotate_across_credentials() {
    let mut first = MockGitHubGateway::new();
    first
        .expect_rest_get()
        .with(always())
        .times(2)
        .returning(|_| Ok(json!({ "login": "a", "id": 1, "html_url": "h", "avatar_url": "a" })));
    let mut second = MockGitHubGateway::new();
    second
        .expect_rest_get()
        .with(always())
        .times(2)
        .returning(|_| Ok(json!({ "login": "b", "id": 2, "html_url": "h", "avatar_url": "a" })));
    let api = api_with(vec![first, second]);

    let mut logins = Vec::new();
    for _ in 0..4 {
        let account = api
            .get_user_account("octocat")
            .await
            .expect("lookup should succeed")
            .expect("account should exist");
        logins.push(account.login);
    }

    assert_eq!(logins, vec!["a", "b", "a", "b"]);
}

#[tokio::test]
async fn rate_limit_report_queries_every_credential_once() {
    let gateways = [12_u32, 4_000]
        .into_iter()
        .map(|remaining| {
            let mut gateway = MockGitHubGateway::new();
            gateway
                .expect_rest_get()
                .withf(|route| route == "/rate_limit")
                .times(1)
                .returning(move |_| {
                    Ok(json!({
                        "resources": {},
                        "rate": { "limit": 5000, "remaining": remaining, "reset": 1_700_000_000 }
                    }))
                });
            gateway
        })
        .collect();
    let api = api_with(gateways);

    let report = api.get_ratelimit().await.expect("report should build");

    assert_eq!(report.token_count, 2);
    let remaining: Vec<u32> = report.per_token.iter().map(|info| info.remaining()).collect();
    assert_eq!(remaining, vec![12, 4_000]);
}

#[tokio::test]
async fn rate_limit_report_fails_on_first_error() {
    let api = api_answering_rest("/rate_limit", Err(server_error()));
    let result = api.get_ratelimit().await;
    assert_eq!(result, Err(server_error()));
}

// REST

#[rstest]
#[case::not_found(not_found())]
#[case::unauthorised(ApiError::Authentication { message: "Bad credentials".to_owned() })]
#[tokio::test]
async fn rest_client_errors_are_not_found(#[case] error: ApiError) {
    let api = api_answering_rest("/orgs/ghost", Err(error));
    let org = api.get_org("ghost").await.expect("lookup should succeed");
    assert_eq!(org, None);
}

#[tokio::test]
async fn rest_server_errors_propagate() {
    let api = api_answering_rest("/users/octocat", Err(server_error()));
    let result = api.get_user_account("octocat").await;
    assert_eq!(result, Err(server_error()));
}

#[tokio::test]
async fn rest_unexpected_shape_is_a_decode_error() {
    let api = api_answering_rest("/users/octocat", Ok(json!({ "unexpected": true })));
    let result = api.get_user_account("octocat").await;
    assert!(
        matches!(result, Err(ApiError::Decode { .. })),
        "expected Decode, got {result:?}"
    );
}

fn repository_summary(name: &str, private: bool) -> Value {
    json!({
        "name": name,
        "full_name": format!("octocat/{name}"),
        "html_url": format!("https://github.com/octocat/{name}"),
        "private": private,
        "fork": false
    })
}

#[tokio::test]
async fn user_repositories_exclude_private_ones() {
    let api = api_answering_rest(
        "/users/octocat/repos",
        Ok(json!([
            repository_summary("public-one", false),
            repository_summary("secret", true),
            repository_summary("public-two", false)
        ])),
    );

    let repositories = api
        .get_user_repos("octocat")
        .await
        .expect("lookup should succeed")
        .expect("user should exist");

    let names: Vec<&str> = repositories.iter().map(|repo| repo.name.as_str()).collect();
    assert_eq!(names, vec!["public-one", "public-two"]);
}

#[tokio::test]
async fn unknown_user_repositories_are_none() {
    let api = api_answering_rest("/users/ghost/repos", Err(not_found()));
    let repositories = api.get_user_repos("ghost").await.expect("lookup should succeed");
    assert_eq!(repositories, None);
}

#[tokio::test]
async fn unknown_org_listings_are_empty() {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_rest_get()
        .with(always())
        .times(3)
        .returning(|_| Err(not_found()));
    let api = api_with(vec![gateway]);

    assert!(api.get_org_repos("ghost").await.expect("repos").is_empty());
    assert!(api.get_org_members("ghost").await.expect("members").is_empty());
    assert!(api.get_user_orgs("ghost").await.expect("orgs").is_empty());
}

#[rstest]
#[case::no_slash("octocat")]
#[case::two_slashes("octo/cat/extra")]
#[case::empty_half("octo/")]
#[tokio::test]
async fn malformed_repositories_skip_the_network(#[case] repo: &str) {
    let api = api_with(vec![MockGitHubGateway::new()]);

    assert!(api.get_repo_files(repo).await.expect("files").is_empty());
    assert!(api.get_tree_file(repo, "src").await.expect("tree").is_empty());
    assert_eq!(api.get_repo(repo).await.expect("repo"), None);
    assert_eq!(api.get_latest_release(repo).await.expect("release"), None);
    assert_eq!(
        api.get_issue(repo, 1).await.expect("issue").sentinel(),
        Some("repo")
    );
    assert_eq!(
        api.get_pull_request(repo, 1).await.expect("pull").sentinel(),
        Some("repo")
    );
    assert_eq!(
        api.get_last_issues_by_state(repo, DEFAULT_LAST, IssueState::Open)
            .await
            .expect("issues"),
        None
    );
    assert!(!api.get_repo_zip(repo).await.expect("zip").exists());
}

#[rstest]
#[case::traversal("a/../orgs/x")]
#[case::query("octocat?per_page=100")]
#[case::dot_dot("..")]
#[case::empty("")]
#[tokio::test]
async fn unsafe_identifiers_skip_the_network(#[case] id: &str) {
    let api = api_with(vec![MockGitHubGateway::new()]);

    assert_eq!(api.get_user_account(id).await.expect("account"), None);
    assert_eq!(api.get_org(id).await.expect("org"), None);
    assert_eq!(api.get_user_repos(id).await.expect("user repos"), None);
    assert!(api.get_org_repos(id).await.expect("org repos").is_empty());
    assert!(api.get_user_orgs(id).await.expect("orgs").is_empty());
    assert!(api.get_org_members(id).await.expect("members").is_empty());
    assert_eq!(api.get_gist(id).await.expect("gist"), None);
}

#[rstest]
#[case::parent("../../orgs/x")]
#[case::nested_parent("src/../..")]
#[case::query("src?ref=main")]
#[tokio::test]
async fn unsafe_tree_paths_skip_the_network(#[case] path: &str) {
    let api = api_with(vec![MockGitHubGateway::new()]);

    let entries = api.get_tree_file("octo/repo", path).await.expect("tree");

    assert!(entries.is_empty());
}

fn content_entry(name: &str, kind: &str) -> Value {
    json!({ "name": name, "path": name, "sha": "abc", "size": 10, "type": kind })
}

#[tokio::test]
async fn repository_root_lists_entries() {
    let api = api_answering_rest(
        "/repos/octo/repo/contents",
        Ok(json!([content_entry("src", "dir"), content_entry("README.md", "file")])),
    );

    let entries = api.get_repo_files("octo/repo").await.expect("lookup should succeed");

    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["src", "README.md"]);
}

#[tokio::test]
async fn tree_file_strips_one_leading_slash_and_wraps_single_files() {
    let api = api_answering_rest(
        "/repos/octo/repo/contents/src/lib.rs",
        Ok(content_entry("lib.rs", "file")),
    );

    let entries = api
        .get_tree_file("octo/repo", "/src/lib.rs")
        .await
        .expect("lookup should succeed");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries.first().map(|entry| entry.kind.as_str()), Some("file"));
}

// GraphQL

#[tokio::test]
async fn repository_lookup_sends_owner_and_name() {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_graphql()
        .withf(|query, variables| {
            query == "query repo" && *variables == json!({ "Owner": "octo", "Name": "repo" })
        })
        .times(1)
        .returning(|_, _| Ok(repository_data("octo", "repo")));
    let api = api_with(vec![gateway]);

    let repository = api
        .get_repo("octo/repo")
        .await
        .expect("lookup should succeed")
        .expect("repository should exist");

    assert_eq!(repository.name_with_owner, "octo/repo");
    assert_eq!(repository.topics.1, repository.topics.0.len());
}

#[tokio::test]
async fn repository_query_error_is_none() {
    let api = api_answering_graphql(
        "repo",
        Err(query_error("Could not resolve to a Repository with the name 'octo/none'.")),
    );
    assert_eq!(api.get_repo("octo/none").await.expect("lookup"), None);
}

#[tokio::test]
async fn graphql_server_errors_propagate() {
    let api = api_answering_graphql("release", Err(server_error()));
    let result = api.get_latest_release("octo/repo").await;
    assert_eq!(result, Err(server_error()));
}

#[tokio::test]
async fn graphql_authentication_errors_propagate() {
    let rejected = ApiError::Authentication {
        message: "Bad credentials".to_owned(),
    };
    let api = api_answering_graphql("user", Err(rejected.clone()));
    let result = api.get_user("octocat").await;
    assert_eq!(result, Err(rejected));
}

#[tokio::test]
async fn user_lookup_sends_contribution_window() {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_graphql()
        .withf(|query, variables| {
            let from_time = variables.get("FromTime").and_then(Value::as_str);
            query == "query user"
                && variables.get("Login") == Some(&json!("mona"))
                && from_time.is_some_and(|from| from.ends_with("-01-01T00:00:30Z"))
                && variables.get("ToTime").is_some()
        })
        .times(1)
        .returning(|_, _| Ok(user_data("mona")));
    let api = api_with(vec![gateway]);

    let user = api
        .get_user("mona")
        .await
        .expect("lookup should succeed")
        .expect("user should exist");

    assert_eq!(user.contributions, (321, 9));
}

#[rstest]
fn contribution_window_spans_current_year() {
    let now = Utc
        .with_ymd_and_hms(2024, 7, 15, 9, 5, 3)
        .single()
        .expect("valid timestamp");

    let (from_time, to_time) = contribution_window(now);

    assert_eq!(from_time, "2024-01-01T00:00:30Z");
    assert_eq!(to_time, "2024-07-15T09:05:03Z");
}

#[tokio::test]
async fn issue_lookup_finds_issue() {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_graphql()
        .withf(|query, variables| query == "query issue" && variables.get("Number") == Some(&json!(17)))
        .times(1)
        .returning(|_, _| Ok(issue_data(17)));
    let api = api_with(vec![gateway]);

    let lookup = api.get_issue("octo/repo", 17).await.expect("lookup should succeed");

    assert_eq!(lookup.sentinel(), None);
    let issue = lookup.found().expect("issue should be found");
    assert_eq!(issue.number, 17);
}

#[rstest]
#[case::bad_number(
    "Could not resolve to an Issue with the number of 99999.",
    Some("number")
)]
#[case::bad_repository(
    "Could not resolve to a Repository with the name 'octo/none'.",
    Some("repo")
)]
#[tokio::test]
async fn issue_query_errors_become_sentinels(
    #[case] message: &'static str,
    #[case] expected: Option<&str>,
) {
    let api = api_answering_graphql("issue", Err(query_error(message)));
    let lookup = api.get_issue("octo/repo", 99_999).await.expect("lookup should succeed");
    assert_eq!(lookup.sentinel(), expected);
}

#[tokio::test]
async fn issue_missing_from_existing_repository_is_invalid_number() {
    let api = api_answering_graphql("issue", Ok(json!({ "repository": { "issue": null } })));
    let lookup = api.get_issue("octo/repo", 4).await.expect("lookup should succeed");
    assert_eq!(lookup, Lookup::InvalidNumber);
}

#[tokio::test]
async fn pull_request_lookup_resolves_reviewers() {
    let api = api_answering_graphql("pull_request", Ok(pull_request_data(9)));

    let pull = api
        .get_pull_request("octo/repo", 9)
        .await
        .expect("lookup should succeed")
        .found()
        .expect("pull request should be found");

    assert_eq!(pull.reviewers.total_count, 3);
    assert_eq!(
        pull.reviewers.pairs().first(),
        Some(&("reviewer", "https://github.com/reviewer"))
    );
}

#[tokio::test]
async fn pull_request_query_error_with_number_is_invalid_number() {
    let api = api_answering_graphql(
        "pull_request",
        Err(query_error("Could not resolve to a PullRequest with the number of 0.")),
    );
    let lookup = api.get_pull_request("octo/repo", 0).await.expect("lookup");
    assert_eq!(lookup, Lookup::InvalidNumber);
}

#[tokio::test]
async fn issue_listing_sends_state_list_and_count() {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_graphql()
        .withf(|query, variables| {
            query == "query issues"
                && variables.get("States") == Some(&json!(["CLOSED"]))
                && variables.get("Last") == Some(&json!(3))
        })
        .times(1)
        .returning(|_, _| Ok(issue_list_data(3)));
    let api = api_with(vec![gateway]);

    let issues = api
        .get_last_issues_by_state("octo/repo", 3, IssueState::Closed)
        .await
        .expect("lookup should succeed")
        .expect("repository should exist");

    let numbers: Vec<u64> = issues.iter().map(|issue| issue.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn pull_request_listing_defaults_to_open() {
    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_graphql()
        .withf(|query, variables| {
            query == "query pull_requests"
                && variables.get("States") == Some(&json!(["OPEN"]))
                && variables.get("Last") == Some(&json!(DEFAULT_LAST))
        })
        .times(1)
        .returning(|_, _| Ok(pull_request_list_data(2)));
    let api = api_with(vec![gateway]);

    let pulls = api
        .get_last_pull_requests_by_state("octo/repo", DEFAULT_LAST, PullRequestState::default())
        .await
        .expect("lookup should succeed")
        .expect("repository should exist");

    assert_eq!(pulls.len(), 2);
}

#[tokio::test]
async fn listing_query_error_is_none() {
    let api = api_answering_graphql("issues", Err(query_error("Something went wrong")));
    let issues = api
        .get_last_issues_by_state("octo/repo", 5, IssueState::Open)
        .await
        .expect("lookup should succeed");
    assert_eq!(issues, None);
}

#[tokio::test]
async fn unsafe_stats_login_is_none() {
    let api = api_with(vec![MockGitHubGateway::new()]);
    let stats = api.ghprofile_stats("a&b").await.expect("lookup should succeed");
    assert_eq!(stats, None);
}
