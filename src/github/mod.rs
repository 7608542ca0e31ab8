//! GitHub access layer for chat command handlers.
//!
//! This module wraps Octocrab to issue authenticated REST and GraphQL
//! requests with round-robin token rotation, reshapes GraphQL answers into
//! flat records, and adds two side lookups: a byte-capped archive download
//! and contribution statistics from an external service. Missing entities are
//! reported as values so that handlers can answer "not found" without
//! inspecting errors.

pub mod api;
pub mod archive;
pub mod error;
pub mod gateway;
pub mod ghprofile;
pub mod locator;
pub mod models;
pub mod normalize;
pub mod queries;
pub mod rate_limit;
pub mod rotation;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use api::{ClientSettings, DEFAULT_LAST, GitHubApi};
pub use archive::{ArchiveProbe, DEFAULT_ARCHIVE_LIMIT};
pub use error::ApiError;
pub use gateway::{GitHubGateway, OctocrabGateway};
pub use ghprofile::GhProfileStats;
pub use locator::{PersonalAccessToken, RepositoryName, RepositoryOwner, RepositorySlug};
pub use models::{
    Issue, IssueState, IssueSummary, LatestRelease, Lookup, PullRequest, PullRequestState,
    PullRequestSummary, Repository, ReviewerIdentity, User, UserGists,
};
pub use queries::QueryStore;
pub use rate_limit::{RateLimitInfo, RateLimitReport};
pub use rotation::TokenRotator;

#[cfg(test)]
pub use gateway::MockGitHubGateway;
