//! Pure reshaping of GraphQL answers into flat records.
//!
//! Every derived field has its own function so it can be tested without a
//! network round trip. The `parse_*` entry points take the `data` object of a
//! GraphQL response and are what the client uses after each query; they are
//! public so callers holding a previously fetched payload can reuse them as
//! plain parsers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::models::raw::{
    Edges, IssueData, IssueListData, Nodes, PullRequestData, PullRequestListData, RawActor,
    RawContributionCalendar, RawGist, RawGistFile, RawIssue, RawIssueSummary, RawLanguage,
    RawLink, RawName, RawPullRequest, RawRelease, RawReleaseRepository, RawRepository,
    RawReviewRequest, RawReviewer, RawTagNode, RawTopicNode, RawUser, ReleaseData,
    RepositoryData, UserData, UserGistsData,
};
use super::models::{
    Author, DEFAULT_COLOR, Gist, GistFile, IdentityList, Issue, IssueSummary, LatestRelease,
    PullRequest, PullRequestSummary, Release, Repository, ReviewerIdentity, ReviewerList, User,
    UserGists, UserLink,
};

pub(crate) fn decode<T: DeserializeOwned>(operation: &str, data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|error| ApiError::Decode {
        operation: operation.to_owned(),
        message: error.to_string(),
    })
}

/// Parses the `data` object of the `repo` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_repository(data: Value) -> Result<Option<Repository>, ApiError> {
    let parsed: RepositoryData = decode("repo", data)?;
    Ok(parsed.repository.map(repository))
}

/// Parses the `data` object of the `release` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_latest_release(data: Value) -> Result<Option<LatestRelease>, ApiError> {
    let parsed: ReleaseData = decode("release", data)?;
    Ok(parsed.repository.map(latest_release))
}

/// Parses the `data` object of the `user` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_user(data: Value) -> Result<Option<User>, ApiError> {
    let parsed: UserData = decode("user", data)?;
    Ok(parsed.user.map(user))
}

/// Parses the `data` object of the `user_gists` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_user_gists(data: Value) -> Result<Option<UserGists>, ApiError> {
    let parsed: UserGistsData = decode("user_gists", data)?;
    Ok(parsed.user.map(|owner| UserGists {
        login: owner.login,
        url: owner.url,
        total_count: owner.gists.total_count,
        gists: owner.gists.nodes.into_iter().map(gist).collect(),
    }))
}

/// Outcome of parsing an issue or pull request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    /// Both the repository and the entity resolved.
    Entity(T),
    /// The repository resolved but the numbered entity did not.
    MissingNumber,
    /// The repository did not resolve.
    MissingRepository,
}

/// Parses the `data` object of the `issue` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_issue(data: Value) -> Result<Resolved<Issue>, ApiError> {
    let parsed: IssueData = decode("issue", data)?;
    Ok(match parsed.repository {
        None => Resolved::MissingRepository,
        Some(repository) => repository
            .issue
            .map_or(Resolved::MissingNumber, |raw| Resolved::Entity(issue(raw))),
    })
}

/// Parses the `data` object of the `pull_request` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_pull_request(data: Value) -> Result<Resolved<PullRequest>, ApiError> {
    let parsed: PullRequestData = decode("pull_request", data)?;
    Ok(match parsed.repository {
        None => Resolved::MissingRepository,
        Some(repository) => repository
            .pull_request
            .map_or(Resolved::MissingNumber, |raw| {
                Resolved::Entity(pull_request(raw))
            }),
    })
}

/// Parses the `data` object of the `issues` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_issue_summaries(data: Value) -> Result<Option<Vec<IssueSummary>>, ApiError> {
    let parsed: IssueListData = decode("issues", data)?;
    Ok(parsed
        .repository
        .map(|repository| repository.issues.nodes.into_iter().map(issue_summary).collect()))
}

/// Parses the `data` object of the `pull_requests` query.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match the query.
pub fn parse_pull_request_summaries(
    data: Value,
) -> Result<Option<Vec<PullRequestSummary>>, ApiError> {
    let parsed: PullRequestListData = decode("pull_requests", data)?;
    Ok(parsed.repository.map(|repository| {
        repository
            .pull_requests
            .nodes
            .into_iter()
            .map(pull_request_summary)
            .collect()
    }))
}

/// Converts a `#rrggbb` language colour into an integer.
///
/// Missing or unparsable colours fall back to [`DEFAULT_COLOR`].
#[must_use]
pub fn parse_color(hex: Option<&str>) -> u32 {
    hex.map(|value| value.strip_prefix('#').unwrap_or(value))
        .and_then(|digits| u32::from_str_radix(digits, 16).ok())
        .unwrap_or(DEFAULT_COLOR)
}

/// Resolves a requested reviewer into a tagged identity.
///
/// The `__typename` discriminator decides when present. Without it the
/// variant is inferred from the fields: `login` means a user, otherwise
/// `name` means a team. Nodes lacking a URL or both identifiers are dropped.
pub(crate) fn reviewer(raw: RawReviewer) -> Option<ReviewerIdentity> {
    let url = raw.url?;
    match (raw.typename.as_deref(), raw.login, raw.name) {
        (Some("Team"), _, Some(name)) => Some(ReviewerIdentity::Team { name, url }),
        (Some("Mannequin"), Some(login), _) => Some(ReviewerIdentity::Mannequin { login, url }),
        (Some("Bot"), Some(login), _) => Some(ReviewerIdentity::Bot { login, url }),
        (_, Some(login), _) => Some(ReviewerIdentity::User { login, url }),
        (_, None, Some(name)) => Some(ReviewerIdentity::Team { name, url }),
        (_, None, None) => None,
    }
}

pub(crate) fn reviewer_list(requests: Edges<RawReviewRequest>) -> ReviewerList {
    ReviewerList {
        identities: requests
            .edges
            .into_iter()
            .filter_map(|edge| edge.node.requested_reviewer)
            .filter_map(reviewer)
            .collect(),
        total_count: requests.total_count,
    }
}

pub(crate) fn identity_list(edges: Edges<RawLink>) -> IdentityList {
    IdentityList {
        users: edges
            .edges
            .into_iter()
            .map(|edge| UserLink {
                login: edge.node.login,
                url: edge.node.url,
            })
            .collect(),
        total_count: edges.total_count,
    }
}

pub(crate) fn label_names(labels: Nodes<RawName>) -> Vec<String> {
    labels.nodes.into_iter().map(|label| label.name).collect()
}

pub(crate) fn label_edge_names(labels: Edges<RawName>) -> Vec<String> {
    labels.edges.into_iter().map(|edge| edge.node.name).collect()
}

pub(crate) fn topics(topics: Nodes<RawTopicNode>) -> (Vec<String>, usize) {
    let names: Vec<String> = topics
        .nodes
        .into_iter()
        .map(|node| node.topic.name)
        .collect();
    let count = names.len();
    (names, count)
}

pub(crate) fn release_tag(releases: Nodes<RawTagNode>) -> Option<String> {
    releases.nodes.into_iter().next().map(|node| node.tag_name)
}

pub(crate) fn social_image(uses_custom_image: bool, image_url: Option<String>) -> Option<String> {
    if uses_custom_image { image_url } else { None }
}

/// `(total this year, count on the latest calendar day)`.
pub(crate) fn contributions(calendar: &RawContributionCalendar) -> (u64, u64) {
    let latest_day = calendar
        .weeks
        .last()
        .and_then(|week| week.contribution_days.last())
        .map_or(0, |day| day.contribution_count);
    (calendar.total_contributions, latest_day)
}

fn language_color(language: Option<&RawLanguage>) -> u32 {
    parse_color(language.and_then(|value| value.color.as_deref()))
}

fn author(raw: RawActor) -> Author {
    Author {
        login: raw.login,
        url: raw.url,
        avatar_url: raw.avatar_url,
    }
}

pub(crate) fn repository(raw: RawRepository) -> Repository {
    Repository {
        color: language_color(raw.primary_language.as_ref()),
        language: raw.primary_language.and_then(|language| language.name),
        language_count: raw.languages.total_count,
        topics: topics(raw.repository_topics),
        release: release_tag(raw.releases),
        graphic: social_image(raw.uses_custom_open_graph_image, raw.open_graph_image_url),
        name: raw.name,
        name_with_owner: raw.name_with_owner,
        owner: author(raw.owner),
        description: raw.description,
        url: raw.url,
        homepage_url: raw.homepage_url.filter(|homepage| !homepage.is_empty()),
        created_at: raw.created_at,
        is_fork: raw.is_fork,
        is_archived: raw.is_archived,
        stargazer_count: raw.stargazer_count,
        fork_count: raw.fork_count,
        watcher_count: raw.watchers.total_count,
        open_issue_count: raw.issues.total_count,
        open_pull_request_count: raw.pull_requests.total_count,
        license: raw.license_info.map(|license| license.name),
    }
}

fn release(raw: RawRelease) -> Release {
    Release {
        name: raw.name,
        tag_name: raw.tag_name,
        url: raw.url,
        published_at: raw.published_at,
        is_prerelease: raw.is_prerelease,
        author: raw.author.map(|link| UserLink {
            login: link.login,
            url: link.url,
        }),
    }
}

pub(crate) fn latest_release(raw: RawReleaseRepository) -> LatestRelease {
    LatestRelease {
        color: language_color(raw.primary_language.as_ref()),
        release_count: raw.releases.total_count,
        release: raw.releases.nodes.into_iter().next().map(release),
        name: raw.name,
        name_with_owner: raw.name_with_owner,
        url: raw.url,
        owner: author(raw.owner),
    }
}

pub(crate) fn user(raw: RawUser) -> User {
    User {
        contributions: contributions(&raw.contributions_collection.contribution_calendar),
        login: raw.login,
        name: raw.name,
        url: raw.url,
        avatar_url: raw.avatar_url,
        bio: raw.bio,
        company: raw.company,
        location: raw.location,
        website_url: raw.website_url,
        twitter_username: raw.twitter_username,
        created_at: raw.created_at,
        organizations: raw.organizations.total_count,
        public_repos: raw.repositories.total_count,
        followers: raw.followers.total_count,
        following: raw.following.total_count,
    }
}

pub(crate) fn issue(raw: RawIssue) -> Issue {
    Issue {
        number: raw.number,
        title: raw.title,
        url: raw.url,
        state: raw.state,
        closed: raw.closed,
        closed_at: raw.closed_at,
        created_at: raw.created_at,
        author: raw.author.map(author),
        body: raw.body_text,
        labels: label_names(raw.labels),
        comment_count: raw.comments.total_count,
        assignee_count: raw.assignees.total_count,
        participant_count: raw.participants.total_count,
    }
}

pub(crate) fn pull_request(raw: RawPullRequest) -> PullRequest {
    PullRequest {
        number: raw.number,
        title: raw.title,
        url: raw.url,
        state: raw.state,
        is_cross_repository: raw.is_cross_repository,
        created_at: raw.created_at,
        closed: raw.closed,
        closed_at: raw.closed_at,
        body: raw.body_text,
        changed_files: raw.changed_files,
        additions: raw.additions,
        deletions: raw.deletions,
        commit_count: raw.commits.total_count,
        comment_count: raw.comments.total_count,
        review_count: raw.reviews.total_count,
        author: raw.author.map(author),
        labels: label_edge_names(raw.labels),
        assignees: identity_list(raw.assignees),
        participants: identity_list(raw.participants),
        reviewers: reviewer_list(raw.review_requests),
    }
}

fn issue_summary(raw: RawIssueSummary) -> IssueSummary {
    IssueSummary {
        number: raw.number,
        title: raw.title,
        url: raw.url,
        state: raw.state,
        created_at: raw.created_at,
        author: raw.author.map(|login| login.login),
        comment_count: raw.comments.total_count,
    }
}

fn pull_request_summary(raw: RawIssueSummary) -> PullRequestSummary {
    PullRequestSummary {
        number: raw.number,
        title: raw.title,
        url: raw.url,
        state: raw.state,
        created_at: raw.created_at,
        is_draft: raw.is_draft,
        author: raw.author.map(|login| login.login),
        comment_count: raw.comments.total_count,
    }
}

fn gist_file(raw: RawGistFile) -> GistFile {
    GistFile {
        name: raw.name,
        extension: raw.extension.filter(|extension| !extension.is_empty()),
        language: raw.language.and_then(|language| language.name),
        text: raw.text,
    }
}

fn gist(raw: RawGist) -> Gist {
    Gist {
        name: raw.name,
        description: raw.description.filter(|description| !description.is_empty()),
        url: raw.url,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        stargazer_count: raw.stargazer_count,
        comment_count: raw.comments.total_count,
        files: raw.files.into_iter().map(gist_file).collect(),
    }
}
