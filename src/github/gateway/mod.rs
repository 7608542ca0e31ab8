//! Transport seam between the lookup façade and GitHub.
//!
//! The façade only ever needs two primitives: an authenticated REST `GET`
//! and a GraphQL `POST`. Keeping them behind a trait lets tests substitute a
//! mock while [`OctocrabGateway`] performs the real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod transport;

pub use transport::OctocrabGateway;

pub(crate) use client::build_http_client;
pub(crate) use error_mapping::{map_http_error, map_reqwest_error};
pub(crate) use http_utils::extract_github_message;

use async_trait::async_trait;
use serde_json::Value;

use crate::github::error::ApiError;

/// Gateway that can issue authenticated requests against one credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubGateway: Send + Sync {
    /// Performs a REST `GET` for `route` (for example `/users/octocat`).
    ///
    /// Returns the decoded JSON body of a successful response.
    async fn rest_get(&self, route: &str) -> Result<Value, ApiError>;

    /// Sends a GraphQL document with its variables.
    ///
    /// Returns the `data` member of the response. A response carrying an
    /// `errors` array is reported as [`ApiError::Query`].
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ApiError>;
}
