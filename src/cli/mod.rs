//! CLI operation mode handlers.
//!
//! [`run`] performs the lookup selected by
//! [`GitbotConfig::operation_mode`] and hands the result to the writers in
//! [`output`].

use std::io::Write;

use gitbot::github::GitHubGateway;
use gitbot::{ApiError, GitHubApi, GitbotConfig, OperationMode};

pub mod output;

use output::{
    write_idle_hint, write_issue, write_latest_release, write_missing_repository,
    write_organization, write_pull_request, write_rate_limits, write_repository, write_user,
    write_user_gists,
};

/// Runs the selected lookup and writes its summary.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when a selector is incomplete, any
/// failure reported by the lookup, and [`ApiError::Io`] when writing fails.
pub async fn run<G, W>(
    config: &GitbotConfig,
    api: &GitHubApi<G>,
    writer: &mut W,
) -> Result<(), ApiError>
where
    G: GitHubGateway,
    W: Write,
{
    match config.operation_mode() {
        OperationMode::RateLimit => write_rate_limits(writer, &api.get_ratelimit().await?),
        OperationMode::Issue => {
            let number = require_number(config.issue, "--issue")?;
            let issue = api.get_issue(config.require_repo()?, number).await?;
            write_issue(writer, &issue)
        }
        OperationMode::PullRequest => {
            let number = require_number(config.pull, "--pull")?;
            let pull = api.get_pull_request(config.require_repo()?, number).await?;
            write_pull_request(writer, &pull)
        }
        OperationMode::LatestRelease => {
            let release = api.get_latest_release(config.require_repo()?).await?;
            write_latest_release(writer, release.as_ref())
        }
        OperationMode::Repository => {
            let repo = config.require_repo()?;
            let Some(repository) = api.get_repo(repo).await? else {
                return write_missing_repository(writer);
            };
            let archive = api.get_repo_zip(repo).await?;
            write_repository(writer, &repository, &archive)
        }
        OperationMode::UserGists => {
            let gists = api.get_user_gists(config.require_user()?).await?;
            write_user_gists(writer, gists.as_ref())
        }
        OperationMode::User => {
            let login = config.require_user()?;
            let user = api.get_user(login).await?;
            let stats = api.ghprofile_stats(login).await?;
            write_user(writer, user.as_ref(), stats.as_ref())
        }
        OperationMode::Organization => {
            let org = config.org.as_deref().unwrap_or_default();
            let account = api.get_org(org).await?;
            let repos = api.get_org_repos(org).await?;
            write_organization(writer, account.as_ref(), &repos)
        }
        OperationMode::Idle => write_idle_hint(writer),
    }
}

fn require_number(value: Option<u64>, flag: &str) -> Result<u64, ApiError> {
    value.ok_or_else(|| ApiError::Configuration {
        message: format!("a number is required (use {flag})"),
    })
}
