//! Lookup façade used by chat command handlers.
//!
//! [`GitHubApi`] owns one gateway per configured credential and hands them
//! out round-robin. Every lookup takes plain identifiers and reports a
//! missing entity on the `Ok` side (`None`, an empty list or a [`Lookup`]
//! sentinel) so handlers only see `Err` for transport or server failures.

use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use super::archive::{ArchiveProbe, DEFAULT_ARCHIVE_LIMIT, probe_archive};
use super::error::ApiError;
use super::gateway::{GitHubGateway, OctocrabGateway, build_http_client};
use super::ghprofile::{DEFAULT_GHPROFILE_BASE, GhProfileStats, fetch_stats};
use super::locator::{
    DEFAULT_API_BASE, PersonalAccessToken, RepositorySlug, is_relative_path, join_route,
    parse_base_url, path_segment,
};
use super::models::rest::ContentsResponse;
use super::models::{
    Account, ContentEntry, GistDetails, Issue, IssueState, IssueSummary, LatestRelease, Lookup,
    Member, OrganizationSummary, PullRequest, PullRequestState, PullRequestSummary, Repository,
    RepositorySummary, User, UserGists,
};
use super::normalize::{
    Resolved, decode, parse_issue, parse_issue_summaries, parse_latest_release,
    parse_pull_request, parse_pull_request_summaries, parse_repository, parse_user,
    parse_user_gists,
};
use super::queries::{QueryStore, REQUIRED_QUERIES};
use super::rate_limit::{ApiRateLimit, RateLimitInfo, RateLimitReport};
use super::rotation::TokenRotator;
use crate::config::GitbotConfig;

/// Number of entries returned by the "last N" listings when unspecified.
pub const DEFAULT_LAST: u32 = 10;

/// Default timeout applied to every HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default requester name used in the user agent.
pub const DEFAULT_REQUESTER: &str = "gitbot";

const RATE_LIMIT_ROUTE: &str = "/rate_limit";

/// Connection settings shared by every credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// GitHub REST base; GraphQL is served from `<api_base>/graphql`.
    pub api_base: Url,
    /// Base URL of the contribution stats service.
    pub ghprofile_base: Url,
    /// Name sent in the user agent as `<requester>; Rust`.
    pub requester: String,
    /// Timeout for connecting and reading every response.
    pub timeout: Duration,
    /// Archive size threshold in bytes.
    pub archive_limit: usize,
}

impl ClientSettings {
    /// Settings for the given service bases with default requester, timeout
    /// and archive threshold.
    #[must_use]
    pub fn new(api_base: Url, ghprofile_base: Url) -> Self {
        Self {
            api_base,
            ghprofile_base,
            requester: DEFAULT_REQUESTER.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            archive_limit: DEFAULT_ARCHIVE_LIMIT,
        }
    }

    /// Settings pointing at `api.github.com` and the public stats service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if a default base fails to parse.
    pub fn public_github() -> Result<Self, ApiError> {
        Ok(Self::new(
            parse_base_url(DEFAULT_API_BASE)?,
            parse_base_url(DEFAULT_GHPROFILE_BASE)?,
        ))
    }
}

struct Credential<G> {
    token: PersonalAccessToken,
    gateway: G,
}

/// Façade over the GitHub REST and GraphQL APIs.
///
/// Safe to share between concurrent command handlers behind an `Arc`; the
/// rotation cursor is the only mutable state.
pub struct GitHubApi<G = OctocrabGateway> {
    credentials: TokenRotator<Credential<G>>,
    queries: QueryStore,
    http: reqwest::Client,
    settings: ClientSettings,
}

impl GitHubApi<OctocrabGateway> {
    /// Builds one Octocrab gateway per token.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoCredentials`] for an empty token list,
    /// [`ApiError::MissingQuery`] when a required template is absent and
    /// [`ApiError::InvalidUrl`] or [`ApiError::Api`] when a client cannot be
    /// built.
    pub fn connect(
        tokens: Vec<PersonalAccessToken>,
        queries: QueryStore,
        settings: ClientSettings,
    ) -> Result<Self, ApiError> {
        let credentials = tokens
            .into_iter()
            .map(|token| {
                let gateway =
                    OctocrabGateway::for_token(&token, &settings.api_base, settings.timeout)?;
                Ok((token, gateway))
            })
            .collect::<Result<Vec<_>, ApiError>>()?;
        Self::with_gateways(credentials, queries, settings)
    }

    /// Resolves credentials, query templates and settings from configuration.
    ///
    /// # Errors
    ///
    /// Returns any configuration, query store or client construction error.
    pub fn from_config(config: &GitbotConfig) -> Result<Self, ApiError> {
        let tokens = config.resolve_tokens()?;
        let queries = QueryStore::load(config.queries_dir())?;
        let settings = config.client_settings()?;
        Self::connect(tokens, queries, settings)
    }
}

impl<G> GitHubApi<G>
where
    G: GitHubGateway,
{
    /// Builds the façade from pre-built gateways, one per token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoCredentials`] for an empty list and
    /// [`ApiError::MissingQuery`] when a required template is absent.
    pub fn with_gateways(
        credentials: Vec<(PersonalAccessToken, G)>,
        queries: QueryStore,
        settings: ClientSettings,
    ) -> Result<Self, ApiError> {
        queries.require(&REQUIRED_QUERIES)?;
        let credentials = TokenRotator::new(
            credentials
                .into_iter()
                .map(|(token, gateway)| Credential { token, gateway })
                .collect(),
        )?;
        let http = build_http_client(&settings.requester, settings.timeout)?;
        tracing::info!(
            credentials = credentials.len(),
            queries = queries.len(),
            api_base = %settings.api_base,
            "GitHub client ready"
        );
        Ok(Self {
            credentials,
            queries,
            http,
            settings,
        })
    }

    /// Number of configured credentials.
    #[must_use]
    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    /// Settings the façade was built with.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // REST

    /// Looks up a user account.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures; 4xx answers yield
    /// `None`.
    pub async fn get_user_account(&self, login: &str) -> Result<Option<Account>, ApiError> {
        self.rest_under("user account", "users", login, "").await
    }

    /// Looks up an organisation.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures; 4xx answers yield
    /// `None`.
    pub async fn get_org(&self, org: &str) -> Result<Option<Account>, ApiError> {
        self.rest_under("organization", "orgs", org, "").await
    }

    /// Lists the public repositories of a user.
    ///
    /// `None` distinguishes an unknown user from one without repositories.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures.
    pub async fn get_user_repos(
        &self,
        login: &str,
    ) -> Result<Option<Vec<RepositorySummary>>, ApiError> {
        let repositories: Option<Vec<RepositorySummary>> = self
            .rest_under("user repositories", "users", login, "/repos")
            .await?;
        Ok(repositories.map(public_only))
    }

    /// Lists the public repositories of an organisation.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures.
    pub async fn get_org_repos(&self, org: &str) -> Result<Vec<RepositorySummary>, ApiError> {
        let repositories: Option<Vec<RepositorySummary>> = self
            .rest_under("organization repositories", "orgs", org, "/repos")
            .await?;
        Ok(repositories.map(public_only).unwrap_or_default())
    }

    /// Lists the public organisation memberships of a user.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures.
    pub async fn get_user_orgs(&self, login: &str) -> Result<Vec<OrganizationSummary>, ApiError> {
        let orgs: Option<Vec<OrganizationSummary>> = self
            .rest_under("user organizations", "users", login, "/orgs")
            .await?;
        Ok(orgs.unwrap_or_default())
    }

    /// Lists the public members of an organisation.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures.
    pub async fn get_org_members(&self, org: &str) -> Result<Vec<Member>, ApiError> {
        let members: Option<Vec<Member>> = self
            .rest_under("organization members", "orgs", org, "/members")
            .await?;
        Ok(members.unwrap_or_default())
    }

    /// Lists the root directory of a repository.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures.
    pub async fn get_repo_files(&self, repo: &str) -> Result<Vec<ContentEntry>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(Vec::new());
        };
        self.contents(&slug.contents_path()).await
    }

    /// Lists a directory, or describes a single file, below the repository
    /// root.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures.
    pub async fn get_tree_file(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(Vec::new());
        };
        let relative = path.strip_prefix('/').unwrap_or(path);
        if !is_relative_path(relative) {
            tracing::debug!(repo, path, "unsafe tree path rejected");
            return Ok(Vec::new());
        }
        let route = format!("{}/{relative}", slug.contents_path());
        self.contents(&route).await
    }

    /// Looks up a gist by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or server failures; 4xx answers yield
    /// `None`.
    pub async fn get_gist(&self, id: &str) -> Result<Option<GistDetails>, ApiError> {
        self.rest_under("gist", "gists", id, "").await
    }

    // GraphQL

    /// Looks up a repository by `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_repo(&self, repo: &str) -> Result<Option<Repository>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(None);
        };
        match self.query("repo", slug_variables(&slug)).await? {
            Some(data) => parse_repository(data),
            None => Ok(None),
        }
    }

    /// Looks up the latest release of a repository.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_latest_release(&self, repo: &str) -> Result<Option<LatestRelease>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(None);
        };
        match self.query("release", slug_variables(&slug)).await? {
            Some(data) => parse_latest_release(data),
            None => Ok(None),
        }
    }

    /// Looks up a user profile with this year's contributions.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_user(&self, login: &str) -> Result<Option<User>, ApiError> {
        let (from_time, to_time) = contribution_window(Utc::now());
        let variables = json!({ "Login": login, "FromTime": from_time, "ToTime": to_time });
        match self.query("user", variables).await? {
            Some(data) => parse_user(data),
            None => Ok(None),
        }
    }

    /// Lists the gists of a user.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_user_gists(&self, login: &str) -> Result<Option<UserGists>, ApiError> {
        match self.query("user_gists", json!({ "Login": login })).await? {
            Some(data) => parse_user_gists(data),
            None => Ok(None),
        }
    }

    /// Looks up an issue.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_issue(&self, repo: &str, number: u64) -> Result<Lookup<Issue>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(Lookup::InvalidRepository);
        };
        match self
            .run_query("issue", numbered_variables(&slug, number))
            .await
        {
            Ok(data) => parse_issue(data).map(lookup_from),
            Err(ApiError::Query { message }) => Ok(lookup_from_query_error("issue", &message)),
            Err(error) => Err(error),
        }
    }

    /// Looks up a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_pull_request(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Lookup<PullRequest>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(Lookup::InvalidRepository);
        };
        match self
            .run_query("pull_request", numbered_variables(&slug, number))
            .await
        {
            Ok(data) => parse_pull_request(data).map(lookup_from),
            Err(ApiError::Query { message }) => {
                Ok(lookup_from_query_error("pull_request", &message))
            }
            Err(error) => Err(error),
        }
    }

    /// Lists the `last` most recent issues in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_last_issues_by_state(
        &self,
        repo: &str,
        last: u32,
        state: IssueState,
    ) -> Result<Option<Vec<IssueSummary>>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(None);
        };
        let variables = listing_variables(&slug, last, state.as_graphql());
        match self.query("issues", variables).await? {
            Some(data) => parse_issue_summaries(data),
            None => Ok(None),
        }
    }

    /// Lists the `last` most recent pull requests in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error for transport, authentication or server failures.
    pub async fn get_last_pull_requests_by_state(
        &self,
        repo: &str,
        last: u32,
        state: PullRequestState,
    ) -> Result<Option<Vec<PullRequestSummary>>, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(None);
        };
        let variables = listing_variables(&slug, last, state.as_graphql());
        match self.query("pull_requests", variables).await? {
            Some(data) => parse_pull_request_summaries(data),
            None => Ok(None),
        }
    }

    // Other services

    /// Streams the repository zipball against the archive threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the transfer fails.
    pub async fn get_repo_zip(&self, repo: &str) -> Result<ArchiveProbe, ApiError> {
        let Some(slug) = RepositorySlug::parse(repo) else {
            return Ok(ArchiveProbe::NotFound);
        };
        let credential = self.credentials.next_entry();
        let url = join_route(&self.settings.api_base, &slug.zipball_path());
        probe_archive(&self.http, &url, &credential.token, self.settings.archive_limit).await
    }

    /// Fetches contribution statistics for `login`.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures or an unreadable answer.
    pub async fn ghprofile_stats(&self, login: &str) -> Result<Option<GhProfileStats>, ApiError> {
        fetch_stats(&self.http, &self.settings.ghprofile_base, login).await
    }

    /// Reports the rate limit of every credential, in configuration order.
    ///
    /// # Errors
    ///
    /// Returns the first failure; no partial report is produced.
    pub async fn get_ratelimit(&self) -> Result<RateLimitReport, ApiError> {
        let mut per_token = Vec::with_capacity(self.credentials.len());
        for credential in self.credentials.iter() {
            let body = credential.gateway.rest_get(RATE_LIMIT_ROUTE).await?;
            let raw: ApiRateLimit = decode("rate limit", body)?;
            per_token.push(RateLimitInfo::from(raw));
        }
        Ok(RateLimitReport {
            per_token,
            token_count: self.credentials.len(),
        })
    }

    async fn rest<T: DeserializeOwned>(
        &self,
        operation: &str,
        route: &str,
    ) -> Result<Option<T>, ApiError> {
        let credential = self.credentials.next_entry();
        match credential.gateway.rest_get(route).await {
            Ok(body) => decode(operation, body).map(Some),
            Err(error) if error.is_client_error() => {
                tracing::warn!(operation, route, %error, "GitHub client error treated as not found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Fetches `/<collection>/<id><suffix>`, answering `None` without a
    /// request when `id` is not a single safe path segment.
    async fn rest_under<T: DeserializeOwned>(
        &self,
        operation: &str,
        collection: &str,
        id: &str,
        suffix: &str,
    ) -> Result<Option<T>, ApiError> {
        let Some(segment) = path_segment(id) else {
            tracing::debug!(operation, id, "unsafe path segment rejected");
            return Ok(None);
        };
        self.rest(operation, &format!("/{collection}/{segment}{suffix}")).await
    }

    async fn contents(&self, route: &str) -> Result<Vec<ContentEntry>, ApiError> {
        let response: Option<ContentsResponse> = self.rest("contents", route).await?;
        Ok(response
            .map(ContentsResponse::into_entries)
            .unwrap_or_default())
    }

    async fn run_query(&self, name: &str, variables: Value) -> Result<Value, ApiError> {
        let query = self.queries.get(name)?;
        self.credentials
            .next_entry()
            .gateway
            .graphql(query, variables)
            .await
    }

    async fn query(&self, name: &str, variables: Value) -> Result<Option<Value>, ApiError> {
        match self.run_query(name, variables).await {
            Ok(data) => Ok(Some(data)),
            Err(ApiError::Query { message }) => {
                tracing::warn!(query = name, %message, "GraphQL query error treated as not found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

fn public_only(repositories: Vec<RepositorySummary>) -> Vec<RepositorySummary> {
    repositories
        .into_iter()
        .filter(|repository| !repository.private)
        .collect()
}

fn slug_variables(slug: &RepositorySlug) -> Value {
    json!({ "Owner": slug.owner().as_str(), "Name": slug.name().as_str() })
}

fn numbered_variables(slug: &RepositorySlug, number: u64) -> Value {
    json!({
        "Owner": slug.owner().as_str(),
        "Name": slug.name().as_str(),
        "Number": number,
    })
}

fn listing_variables(slug: &RepositorySlug, last: u32, state: &str) -> Value {
    json!({
        "Owner": slug.owner().as_str(),
        "Name": slug.name().as_str(),
        "Last": last,
        "States": [state],
    })
}

/// `(FromTime, ToTime)` for the contribution calendar: the start of the
/// current year (at `00:00:30Z`) up to `now`, second precision.
fn contribution_window(now: DateTime<Utc>) -> (String, String) {
    (
        format!("{}-01-01T00:00:30Z", now.year()),
        now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    )
}

fn lookup_from<T>(resolved: Resolved<T>) -> Lookup<T> {
    match resolved {
        Resolved::Entity(entity) => Lookup::Found(entity),
        Resolved::MissingNumber => Lookup::InvalidNumber,
        Resolved::MissingRepository => Lookup::InvalidRepository,
    }
}

/// GitHub names the offending argument in the message; `number` means the
/// repository resolved but the issue or pull request did not.
fn lookup_from_query_error<T>(query: &str, message: &str) -> Lookup<T> {
    tracing::warn!(query, message, "GraphQL query error");
    if message.contains("number") {
        Lookup::InvalidNumber
    } else {
        Lookup::InvalidRepository
    }
}

#[cfg(test)]
mod tests;
