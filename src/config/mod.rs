//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.gitbot.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `GITBOT_TOKENS`, `GITBOT_REPO`, ... or the
//!    legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--tokens`/`-t`, `--repo`/`-r`, ...
//!
//! # Configuration File
//!
//! ```toml
//! tokens = "ghp_first,ghp_second"
//! requester = "my-bot"
//! queries_dir = "queries"
//! request_timeout_seconds = 30
//! archive_limit_bytes = 8231321
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::api::{ClientSettings, DEFAULT_REQUESTER};
use crate::github::archive::DEFAULT_ARCHIVE_LIMIT;
use crate::github::error::ApiError;
use crate::github::ghprofile::DEFAULT_GHPROFILE_BASE;
use crate::github::locator::{DEFAULT_API_BASE, PersonalAccessToken, parse_base_url};
use crate::github::rotation::credentials_from;

const DEFAULT_QUERIES_DIR: &str = "queries";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Lookup selected by the CLI selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Report the rate limit of every credential.
    RateLimit,
    /// Show one issue of a repository.
    Issue,
    /// Show one pull request of a repository.
    PullRequest,
    /// Show the latest release of a repository.
    LatestRelease,
    /// Show repository details.
    Repository,
    /// List the gists of a user.
    UserGists,
    /// Show a user profile.
    User,
    /// Show an organization and its public repositories.
    Organization,
    /// Nothing selected.
    Idle,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use gitbot::GitbotConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = GitbotConfig::load().expect("failed to load configuration");
/// let tokens = config.resolve_tokens().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GITBOT",
    discovery(
        dotfile_name = ".gitbot.toml",
        config_file_name = "gitbot.toml",
        app_name = "gitbot"
    )
)]
pub struct GitbotConfig {
    /// Comma-separated personal access tokens, used round-robin.
    ///
    /// Can be provided via:
    /// - CLI: `--tokens <TOKENS>` or `-t <TOKENS>`
    /// - Environment: `GITBOT_TOKENS` or `GITHUB_TOKEN` (legacy, single token)
    /// - Config file: `tokens = "..."`
    #[ortho_config(cli_short = 't')]
    pub tokens: Option<String>,

    /// Name sent in the user agent.
    #[ortho_config(cli_short = 'A')]
    pub requester: String,

    /// Directory holding the `.graphql` query templates.
    #[ortho_config(cli_short = 'q')]
    pub queries_dir: String,

    /// GitHub REST base URL. GraphQL is served from `<api_base>/graphql`.
    #[ortho_config(cli_short = 'B')]
    pub api_base: String,

    /// Base URL of the contribution stats service.
    #[ortho_config(cli_short = 'S')]
    pub ghprofile_base: String,

    /// Timeout applied to every HTTP request, in seconds.
    #[ortho_config(cli_short = 'w')]
    pub request_timeout_seconds: u64,

    /// Archive size threshold, in bytes.
    #[ortho_config(cli_short = 'z')]
    pub archive_limit_bytes: u64,

    /// Repository as `owner/name`.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// User login.
    #[ortho_config(cli_short = 'u')]
    pub user: Option<String>,

    /// Organization login.
    #[ortho_config(cli_short = 'o')]
    pub org: Option<String>,

    /// Issue number; requires `repo`.
    #[ortho_config(cli_short = 'i')]
    pub issue: Option<u64>,

    /// Pull request number; requires `repo`.
    #[ortho_config(cli_short = 'p')]
    pub pull: Option<u64>,

    /// Lists the gists of `user` instead of the profile.
    #[ortho_config(cli_short = 'g')]
    pub gists: bool,

    /// Shows the latest release of `repo` instead of the repository.
    #[ortho_config(cli_short = 'l')]
    pub release: bool,

    /// Reports the rate limit of every credential.
    ///
    /// Booleans are not read from the environment by `ortho_config`; use the
    /// CLI flag or the configuration file.
    #[ortho_config(cli_short = 'L')]
    pub ratelimit: bool,
}

impl Default for GitbotConfig {
    fn default() -> Self {
        Self {
            tokens: None,
            requester: DEFAULT_REQUESTER.to_owned(),
            queries_dir: DEFAULT_QUERIES_DIR.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            ghprofile_base: DEFAULT_GHPROFILE_BASE.to_owned(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            archive_limit_bytes: DEFAULT_ARCHIVE_LIMIT as u64,
            repo: None,
            user: None,
            org: None,
            issue: None,
            pull: None,
            gists: false,
            release: false,
            ratelimit: false,
        }
    }
}

impl GitbotConfig {
    /// Resolves the credential list.
    ///
    /// `tokens` is split on commas and blank entries are dropped. When it is
    /// unset the legacy `GITHUB_TOKEN` environment variable supplies a single
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoCredentials`] when no source yields a token.
    pub fn resolve_tokens(&self) -> Result<Vec<PersonalAccessToken>, ApiError> {
        match self.tokens.as_deref() {
            Some(raw) => credentials_from(raw.split(',').map(|token| Some(token.trim()))),
            None => credentials_from([env::var("GITHUB_TOKEN").ok()]),
        }
    }

    /// Directory holding the query templates.
    #[must_use]
    pub fn queries_dir(&self) -> &Utf8Path {
        Utf8Path::new(&self.queries_dir)
    }

    /// Builds the client settings from the configured endpoints and limits.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] for an unparsable base URL and
    /// [`ApiError::Configuration`] for a zero timeout or an archive limit
    /// that does not fit in memory.
    pub fn client_settings(&self) -> Result<ClientSettings, ApiError> {
        if self.request_timeout_seconds == 0 {
            return Err(ApiError::Configuration {
                message: "request_timeout_seconds must be positive".to_owned(),
            });
        }
        let archive_limit =
            usize::try_from(self.archive_limit_bytes).map_err(|_| ApiError::Configuration {
                message: format!(
                    "archive_limit_bytes {} exceeds the addressable size",
                    self.archive_limit_bytes
                ),
            })?;

        Ok(ClientSettings {
            api_base: parse_base_url(&self.api_base)?,
            ghprofile_base: parse_base_url(&self.ghprofile_base)?,
            requester: self.requester.clone(),
            timeout: Duration::from_secs(self.request_timeout_seconds),
            archive_limit,
        })
    }

    /// Returns the configured repository or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when no repository is configured.
    pub fn require_repo(&self) -> Result<&str, ApiError> {
        self.repo.as_deref().ok_or_else(|| ApiError::Configuration {
            message: "repository is required (use --repo or -r)".to_owned(),
        })
    }

    /// Returns the configured user login or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when no user is configured.
    pub fn require_user(&self) -> Result<&str, ApiError> {
        self.user.as_deref().ok_or_else(|| ApiError::Configuration {
            message: "user login is required (use --user or -u)".to_owned(),
        })
    }

    /// Determines the lookup to perform.
    ///
    /// `ratelimit` wins over everything. Issue, pull request and release
    /// selectors only apply together with `repo`, and `gists` only together
    /// with `user`.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.ratelimit {
            OperationMode::RateLimit
        } else if self.repo.is_some() {
            if self.issue.is_some() {
                OperationMode::Issue
            } else if self.pull.is_some() {
                OperationMode::PullRequest
            } else if self.release {
                OperationMode::LatestRelease
            } else {
                OperationMode::Repository
            }
        } else if self.user.is_some() {
            if self.gists {
                OperationMode::UserGists
            } else {
                OperationMode::User
            }
        } else if self.org.is_some() {
            OperationMode::Organization
        } else {
            OperationMode::Idle
        }
    }
}

#[cfg(test)]
mod tests;
