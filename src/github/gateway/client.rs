//! Octocrab client construction.

use std::time::Duration;

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::ApiError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::{map_octocrab_error, map_reqwest_error};

/// Builds an Octocrab client for the given token and API base URL.
///
/// The timeout bounds both connecting and reading a response.
///
/// # Errors
///
/// Returns `ApiError::InvalidUrl` when the base URI cannot be parsed or
/// `ApiError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &Url,
    timeout: Duration,
) -> Result<Octocrab, ApiError> {
    let base_uri: Uri = api_base
        .as_str()
        .trim_end_matches('/')
        .parse::<Uri>()
        .map_err(|error| ApiError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.value())
        .base_uri(base_uri)
        .map_err(|error| ApiError::Api {
            message: format!("build client failed: {error}"),
        })?
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout))
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Builds the plain HTTP client shared by the archive and stats lookups.
///
/// Requests identify themselves as `<requester>; Rust`.
pub(crate) fn build_http_client(
    requester: &str,
    timeout: Duration,
) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .user_agent(format!("{requester}; Rust"))
        .timeout(timeout)
        .build()
        .map_err(|error| map_reqwest_error("build http client", &error))
}
