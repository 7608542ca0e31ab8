//! GitHub access layer for the `GitBot` chat bot.
//!
//! The library wraps Octocrab to answer chat lookups about repositories,
//! users, organizations, issues, pull requests and gists. Requests rotate
//! across several personal access tokens, GraphQL answers are reshaped into
//! flat records, and missing entities are reported as values rather than
//! errors.

pub mod config;
pub mod github;

pub use config::{GitbotConfig, OperationMode};
pub use github::{
    ApiError, ArchiveProbe, ClientSettings, GhProfileStats, GitHubApi, GitHubGateway, Lookup,
    OctocrabGateway, PersonalAccessToken, QueryStore, RateLimitReport, RepositorySlug,
};
