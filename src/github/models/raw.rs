//! Raw GraphQL response shapes, one struct per query template.
//!
//! These mirror the selections in `queries/*.graphql`. They are only ever
//! consumed by the normalisers.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TotalCount {
    #[serde(default)]
    pub(crate) total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub(crate) nodes: Vec<T>,
    #[serde(default)]
    pub(crate) total_count: u64,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            total_count: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Edge<T> {
    pub(crate) node: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Edges<T> {
    #[serde(default = "Vec::new")]
    pub(crate) edges: Vec<Edge<T>>,
    #[serde(default)]
    pub(crate) total_count: u64,
}

impl<T> Default for Edges<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            total_count: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawActor {
    pub(crate) login: String,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLink {
    pub(crate) login: String,
    pub(crate) url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLogin {
    pub(crate) login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawName {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawLanguage {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) color: Option<String>,
}

// repo.graphql

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepositoryData {
    pub(crate) repository: Option<RawRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTopicNode {
    pub(crate) topic: RawName,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTagNode {
    pub(crate) tag_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRepository {
    pub(crate) name: String,
    pub(crate) name_with_owner: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) homepage_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) is_fork: bool,
    #[serde(default)]
    pub(crate) is_archived: bool,
    #[serde(default)]
    pub(crate) stargazer_count: u64,
    #[serde(default)]
    pub(crate) fork_count: u64,
    pub(crate) owner: RawActor,
    #[serde(default)]
    pub(crate) primary_language: Option<RawLanguage>,
    #[serde(default)]
    pub(crate) languages: TotalCount,
    #[serde(default)]
    pub(crate) watchers: TotalCount,
    #[serde(default)]
    pub(crate) issues: TotalCount,
    #[serde(default)]
    pub(crate) pull_requests: TotalCount,
    #[serde(default)]
    pub(crate) license_info: Option<RawName>,
    #[serde(default)]
    pub(crate) repository_topics: Nodes<RawTopicNode>,
    #[serde(default)]
    pub(crate) releases: Nodes<RawTagNode>,
    #[serde(default)]
    pub(crate) uses_custom_open_graph_image: bool,
    #[serde(default)]
    pub(crate) open_graph_image_url: Option<String>,
}

// release.graphql

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReleaseData {
    pub(crate) repository: Option<RawReleaseRepository>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawReleaseRepository {
    pub(crate) name: String,
    pub(crate) name_with_owner: String,
    pub(crate) url: String,
    pub(crate) owner: RawActor,
    #[serde(default)]
    pub(crate) primary_language: Option<RawLanguage>,
    #[serde(default)]
    pub(crate) releases: Nodes<RawRelease>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRelease {
    #[serde(default)]
    pub(crate) name: Option<String>,
    pub(crate) tag_name: String,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) is_prerelease: bool,
    #[serde(default)]
    pub(crate) author: Option<RawLink>,
}

// user.graphql

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserData {
    pub(crate) user: Option<RawUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContributionDay {
    pub(crate) contribution_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContributionWeek {
    #[serde(default)]
    pub(crate) contribution_days: Vec<RawContributionDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContributionCalendar {
    pub(crate) total_contributions: u64,
    #[serde(default)]
    pub(crate) weeks: Vec<RawContributionWeek>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContributionsCollection {
    pub(crate) contribution_calendar: RawContributionCalendar,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawUser {
    pub(crate) login: String,
    #[serde(default)]
    pub(crate) name: Option<String>,
    pub(crate) url: String,
    pub(crate) avatar_url: String,
    #[serde(default)]
    pub(crate) bio: Option<String>,
    #[serde(default)]
    pub(crate) company: Option<String>,
    #[serde(default)]
    pub(crate) location: Option<String>,
    #[serde(default)]
    pub(crate) website_url: Option<String>,
    #[serde(default)]
    pub(crate) twitter_username: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) contributions_collection: RawContributionsCollection,
    #[serde(default)]
    pub(crate) organizations: TotalCount,
    #[serde(default)]
    pub(crate) repositories: TotalCount,
    #[serde(default)]
    pub(crate) followers: TotalCount,
    #[serde(default)]
    pub(crate) following: TotalCount,
}

// issue.graphql

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IssueData {
    pub(crate) repository: Option<IssueRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IssueRepository {
    pub(crate) issue: Option<RawIssue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawIssue {
    #[serde(default)]
    pub(crate) author: Option<RawActor>,
    pub(crate) url: String,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) closed: bool,
    #[serde(default)]
    pub(crate) closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) body_text: String,
    pub(crate) title: String,
    pub(crate) number: u64,
    pub(crate) state: String,
    #[serde(default)]
    pub(crate) comments: TotalCount,
    #[serde(default)]
    pub(crate) participants: TotalCount,
    #[serde(default)]
    pub(crate) assignees: TotalCount,
    #[serde(default)]
    pub(crate) labels: Nodes<RawName>,
}

// pull_request.graphql

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PullRequestData {
    pub(crate) repository: Option<PullRequestRepository>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestRepository {
    pub(crate) pull_request: Option<RawPullRequest>,
}

/// Union member of `requestedReviewer`; which fields are present depends on
/// the concrete type.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawReviewer {
    #[serde(default, rename = "__typename")]
    pub(crate) typename: Option<String>,
    #[serde(default)]
    pub(crate) login: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawReviewRequest {
    #[serde(default)]
    pub(crate) requested_reviewer: Option<RawReviewer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPullRequest {
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) is_cross_repository: bool,
    pub(crate) state: String,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) closed: bool,
    #[serde(default)]
    pub(crate) closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) body_text: String,
    #[serde(default)]
    pub(crate) changed_files: u64,
    #[serde(default)]
    pub(crate) commits: TotalCount,
    #[serde(default)]
    pub(crate) additions: u64,
    #[serde(default)]
    pub(crate) deletions: u64,
    #[serde(default)]
    pub(crate) author: Option<RawActor>,
    #[serde(default)]
    pub(crate) comments: TotalCount,
    #[serde(default)]
    pub(crate) assignees: Edges<RawLink>,
    #[serde(default)]
    pub(crate) reviews: TotalCount,
    #[serde(default)]
    pub(crate) participants: Edges<RawLink>,
    #[serde(default)]
    pub(crate) review_requests: Edges<RawReviewRequest>,
    #[serde(default)]
    pub(crate) labels: Edges<RawName>,
}

// issues.graphql / pull_requests.graphql

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IssueListData {
    pub(crate) repository: Option<IssueListRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IssueListRepository {
    pub(crate) issues: Nodes<RawIssueSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PullRequestListData {
    pub(crate) repository: Option<PullRequestListRepository>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestListRepository {
    pub(crate) pull_requests: Nodes<RawIssueSummary>,
}

/// Listing node shared by the issue and pull request listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawIssueSummary {
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) state: String,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) is_draft: bool,
    #[serde(default)]
    pub(crate) author: Option<RawLogin>,
    #[serde(default)]
    pub(crate) comments: TotalCount,
}

// user_gists.graphql

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserGistsData {
    pub(crate) user: Option<RawGistOwner>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawGistOwner {
    pub(crate) login: String,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) gists: Nodes<RawGist>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawGist {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) url: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) stargazer_count: u64,
    #[serde(default)]
    pub(crate) comments: TotalCount,
    #[serde(default)]
    pub(crate) files: Vec<RawGistFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawGistFile {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) extension: Option<String>,
    #[serde(default)]
    pub(crate) language: Option<RawLanguage>,
    #[serde(default)]
    pub(crate) text: Option<String>,
}
