//! Flat records handed to chat command handlers.
//!
//! GraphQL answers arrive as nested `edges`/`nodes`/`totalCount` envelopes;
//! the records in this module are their normalised counterparts (see
//! [`crate::github::normalize`]). REST answers are already flat and are
//! decoded straight into the types of [`rest`].

use chrono::{DateTime, Utc};

pub(crate) mod raw;
pub mod rest;

pub use rest::{
    Account, ContentEntry, GistDetails, GistDetailsFile, Member, OrganizationSummary,
    RepositorySummary,
};

/// Colour used when a repository has no primary language.
pub const DEFAULT_COLOR: u32 = 0x00ef_efef;

/// Tri-state outcome of issue and pull request lookups.
///
/// GitHub reports a missing repository and a missing issue number through the
/// same error channel; callers show different messages for each, so the
/// lookup keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The entity exists.
    Found(T),
    /// The repository exists but the number does not resolve.
    InvalidNumber,
    /// The repository identifier is malformed or does not resolve.
    InvalidRepository,
}

impl<T> Lookup<T> {
    /// Sentinel understood by the chat layer: `"number"` or `"repo"`.
    #[must_use]
    pub const fn sentinel(&self) -> Option<&'static str> {
        match self {
            Self::Found(_) => None,
            Self::InvalidNumber => Some("number"),
            Self::InvalidRepository => Some("repo"),
        }
    }

    /// Returns the entity, discarding the miss reason.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::InvalidNumber | Self::InvalidRepository => None,
        }
    }

    /// Maps the found entity.
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(transform(value)),
            Self::InvalidNumber => Lookup::InvalidNumber,
            Self::InvalidRepository => Lookup::InvalidRepository,
        }
    }
}

/// Issue states accepted by the "last issues" lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueState {
    /// Open issues.
    #[default]
    Open,
    /// Closed issues.
    Closed,
}

impl IssueState {
    /// GraphQL enum value.
    #[must_use]
    pub const fn as_graphql(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

/// Pull request states accepted by the "last pull requests" lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PullRequestState {
    /// Open pull requests.
    #[default]
    Open,
    /// Closed without merging.
    Closed,
    /// Merged pull requests.
    Merged,
}

impl PullRequestState {
    /// GraphQL enum value.
    #[must_use]
    pub const fn as_graphql(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Merged => "MERGED",
        }
    }
}

/// A login and profile URL pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLink {
    /// Account login.
    pub login: String,
    /// Profile URL.
    pub url: String,
}

impl UserLink {
    /// Returns `(login, url)`.
    #[must_use]
    pub fn as_pair(&self) -> (&str, &str) {
        (self.login.as_str(), self.url.as_str())
    }
}

/// Identity list flattened from an edge envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityList {
    /// Identities in source order.
    pub users: Vec<UserLink>,
    /// Total reported by GitHub, which may exceed `users.len()`.
    pub total_count: u64,
}

/// Author of an issue, pull request or repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Account login.
    pub login: String,
    /// Profile URL.
    pub url: String,
    /// Avatar URL, when requested.
    pub avatar_url: Option<String>,
}

/// A requested reviewer: user, team, mannequin or bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewerIdentity {
    /// A user account.
    User {
        /// Account login.
        login: String,
        /// Profile URL.
        url: String,
    },
    /// An organisation team.
    Team {
        /// Team name.
        name: String,
        /// Team URL.
        url: String,
    },
    /// A placeholder for an imported identity.
    Mannequin {
        /// Placeholder login.
        login: String,
        /// Placeholder URL.
        url: String,
    },
    /// A bot account.
    Bot {
        /// Bot login.
        login: String,
        /// Bot URL.
        url: String,
    },
}

impl ReviewerIdentity {
    /// Returns `(login or name, url)` as displayed by the chat layer.
    #[must_use]
    pub fn as_pair(&self) -> (&str, &str) {
        match self {
            Self::User { login, url } | Self::Mannequin { login, url } | Self::Bot { login, url } => {
                (login.as_str(), url.as_str())
            }
            Self::Team { name, url } => (name.as_str(), url.as_str()),
        }
    }
}

/// Requested reviewers of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerList {
    /// Resolved identities in source order.
    pub identities: Vec<ReviewerIdentity>,
    /// Number of review requests reported by GitHub.
    pub total_count: u64,
}

impl ReviewerList {
    /// `(login or name, url)` pairs in source order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.identities.iter().map(ReviewerIdentity::as_pair).collect()
    }
}

/// Normalised repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    pub name_with_owner: String,
    /// Owning account.
    pub owner: Author,
    /// Description, if set.
    pub description: Option<String>,
    /// Repository URL.
    pub url: String,
    /// Homepage URL, if set.
    pub homepage_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the repository is a fork.
    pub is_fork: bool,
    /// Whether the repository is archived.
    pub is_archived: bool,
    /// Star count.
    pub stargazer_count: u64,
    /// Fork count.
    pub fork_count: u64,
    /// Watcher count.
    pub watcher_count: u64,
    /// Open issue count.
    pub open_issue_count: u64,
    /// Open pull request count.
    pub open_pull_request_count: u64,
    /// License name, if detected.
    pub license: Option<String>,
    /// Primary language name.
    pub language: Option<String>,
    /// Primary language colour as an integer.
    pub color: u32,
    /// Number of languages detected.
    pub language_count: u64,
    /// Topic names and their count.
    pub topics: (Vec<String>, usize),
    /// Tag of the latest release.
    pub release: Option<String>,
    /// Custom social preview image.
    pub graphic: Option<String>,
}

/// A published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release title.
    pub name: Option<String>,
    /// Git tag.
    pub tag_name: String,
    /// Release page URL.
    pub url: String,
    /// Publication time; `None` for drafts.
    pub published_at: Option<DateTime<Utc>>,
    /// Whether the release is marked as a prerelease.
    pub is_prerelease: bool,
    /// Release author.
    pub author: Option<UserLink>,
}

/// Repository identity with its newest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    pub name_with_owner: String,
    /// Repository URL.
    pub url: String,
    /// Owning account.
    pub owner: Author,
    /// Primary language colour.
    pub color: u32,
    /// Newest release, if any.
    pub release: Option<Release>,
    /// Number of releases.
    pub release_count: u64,
}

/// Normalised user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Account login.
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Profile URL.
    pub url: String,
    /// Avatar URL.
    pub avatar_url: String,
    /// Profile bio.
    pub bio: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Website.
    pub website_url: Option<String>,
    /// Twitter handle.
    pub twitter_username: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Contributions this year and on the latest day.
    pub contributions: (u64, u64),
    /// Organisation memberships.
    pub organizations: u64,
    /// Public repositories.
    pub public_repos: u64,
    /// Followers.
    pub followers: u64,
    /// Accounts followed.
    pub following: u64,
}

/// Normalised issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Issue URL.
    pub url: String,
    /// `OPEN` or `CLOSED`.
    pub state: String,
    /// Whether the issue is closed.
    pub closed: bool,
    /// Closing time.
    pub closed_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Author; `None` for deleted accounts.
    pub author: Option<Author>,
    /// Body as plain text.
    pub body: String,
    /// Label names in source order.
    pub labels: Vec<String>,
    /// Number of comments.
    pub comment_count: u64,
    /// Number of assignees.
    pub assignee_count: u64,
    /// Number of participants.
    pub participant_count: u64,
}

/// Normalised pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Pull request URL.
    pub url: String,
    /// `OPEN`, `CLOSED` or `MERGED`.
    pub state: String,
    /// Whether the head lives in a fork.
    pub is_cross_repository: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the pull request is closed.
    pub closed: bool,
    /// Closing time.
    pub closed_at: Option<DateTime<Utc>>,
    /// Body as plain text.
    pub body: String,
    /// Changed file count.
    pub changed_files: u64,
    /// Added lines.
    pub additions: u64,
    /// Deleted lines.
    pub deletions: u64,
    /// Commit count.
    pub commit_count: u64,
    /// Comment count.
    pub comment_count: u64,
    /// Review count.
    pub review_count: u64,
    /// Author; `None` for deleted accounts.
    pub author: Option<Author>,
    /// Label names in source order.
    pub labels: Vec<String>,
    /// Assignees.
    pub assignees: IdentityList,
    /// Participants.
    pub participants: IdentityList,
    /// Requested reviewers.
    pub reviewers: ReviewerList,
}

/// Entry of the "last issues" listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSummary {
    /// Issue number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Issue URL.
    pub url: String,
    /// State.
    pub state: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Author login.
    pub author: Option<String>,
    /// Comment count.
    pub comment_count: u64,
}

/// Entry of the "last pull requests" listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Pull request number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Pull request URL.
    pub url: String,
    /// State.
    pub state: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the pull request is a draft.
    pub is_draft: bool,
    /// Author login.
    pub author: Option<String>,
    /// Comment count.
    pub comment_count: u64,
}

/// A file inside a gist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistFile {
    /// File name.
    pub name: String,
    /// File extension.
    pub extension: Option<String>,
    /// Detected language.
    pub language: Option<String>,
    /// File contents; `None` for binary files.
    pub text: Option<String>,
}

/// A public gist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gist {
    /// Gist identifier.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Gist URL.
    pub url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Star count.
    pub stargazer_count: u64,
    /// Comment count.
    pub comment_count: u64,
    /// Files with contents.
    pub files: Vec<GistFile>,
}

/// A user's public gists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserGists {
    /// Account login.
    pub login: String,
    /// Profile URL.
    pub url: String,
    /// Number of public gists.
    pub total_count: u64,
    /// Newest gists first.
    pub gists: Vec<Gist>,
}
