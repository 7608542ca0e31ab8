//! REST payloads returned as-is to callers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User or organisation account (`/users/{login}`, `/orgs/{org}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account login.
    pub login: String,
    /// Numeric account identifier.
    pub id: u64,
    /// `User`, `Organization` or `Bot`; absent on organisation lookups.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Profile URL.
    pub html_url: String,
    /// Avatar URL.
    pub avatar_url: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Company.
    #[serde(default)]
    pub company: Option<String>,
    /// Blog or website.
    #[serde(default)]
    pub blog: Option<String>,
    /// Location.
    #[serde(default)]
    pub location: Option<String>,
    /// Bio or organisation description.
    #[serde(default, alias = "description")]
    pub bio: Option<String>,
    /// Public repository count.
    #[serde(default)]
    pub public_repos: Option<u64>,
    /// Follower count.
    #[serde(default)]
    pub followers: Option<u64>,
    /// Following count.
    #[serde(default)]
    pub following: Option<u64>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Entry of a repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Repository page.
    pub html_url: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,
    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,
}

/// Entry of `/users/{login}/orgs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    /// Organisation login.
    pub login: String,
    /// Numeric identifier.
    pub id: u64,
    /// API URL.
    pub url: String,
    /// Avatar URL.
    pub avatar_url: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Entry of `/orgs/{org}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member login.
    pub login: String,
    /// Numeric identifier.
    pub id: u64,
    /// Profile URL.
    pub html_url: String,
    /// Avatar URL.
    pub avatar_url: String,
}

/// File or directory returned by the contents API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Entry name.
    pub name: String,
    /// Path from the repository root.
    pub path: String,
    /// Blob or tree SHA.
    pub sha: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// `file`, `dir`, `symlink` or `submodule`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Page URL.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Raw download URL for files.
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Contents API answer: a directory listing or a single entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

impl ContentsResponse {
    pub(crate) fn into_entries(self) -> Vec<ContentEntry> {
        match self {
            Self::Listing(entries) => entries,
            Self::Single(entry) => vec![entry],
        }
    }
}

/// File of a REST gist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistDetailsFile {
    /// File name.
    pub filename: String,
    /// Detected language.
    #[serde(default)]
    pub language: Option<String>,
    /// Raw file URL.
    pub raw_url: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Contents, possibly truncated by GitHub.
    #[serde(default)]
    pub content: Option<String>,
}

/// Gist as returned by `/gists/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistDetails {
    /// Gist identifier.
    pub id: String,
    /// Gist page.
    pub html_url: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the gist is public.
    pub public: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Comment count.
    #[serde(default)]
    pub comments: u64,
    /// Owner, absent for anonymous gists.
    #[serde(default)]
    pub owner: Option<Member>,
    /// Files keyed by file name.
    #[serde(default)]
    pub files: BTreeMap<String, GistDetailsFile>,
}
