//! Octocrab implementation of the gateway.

use std::time::Duration;

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::{Value, json};
use url::Url;

use crate::github::error::ApiError;
use crate::github::locator::PersonalAccessToken;
use crate::github::rate_limit::RateLimitInfo;

use super::GitHubGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{is_rate_limit_error, map_octocrab_error};
use super::http_utils::graphql_data;

const GRAPHQL_ROUTE: &str = "/graphql";

/// Octocrab-backed gateway bound to a single personal access token.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` when the base URI cannot be parsed or
    /// `ApiError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        api_base: &Url,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let octocrab = build_octocrab_client(token, api_base, timeout)?;
        Ok(Self::new(octocrab))
    }

    async fn map_octocrab_error_with_rate_limit(
        &self,
        operation: &str,
        error: &octocrab::Error,
    ) -> ApiError {
        match error {
            octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
                let rate_limit = self.fetch_rate_limit_info().await;
                let base_message =
                    format!("{operation} failed: {message}", message = source.message);
                let message = match &rate_limit {
                    Some(info) => format!(
                        "{base_message} (resets at {reset})",
                        reset = info.reset_at()
                    ),
                    None => base_message,
                };

                ApiError::RateLimitExceeded {
                    rate_limit,
                    message,
                }
            }
            _ => map_octocrab_error(operation, error),
        }
    }

    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        Some(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}

#[async_trait]
impl GitHubGateway for OctocrabGateway {
    async fn rest_get(&self, route: &str) -> Result<Value, ApiError> {
        tracing::debug!(route, "GET");
        match self.client.get::<Value, _, _>(route, None::<&()>).await {
            Ok(body) => Ok(body),
            Err(error) => Err(self.map_octocrab_error_with_rate_limit(route, &error).await),
        }
    }

    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        tracing::debug!(route = GRAPHQL_ROUTE, %variables, "POST");
        let payload = json!({ "query": query, "variables": variables });
        let body = match self
            .client
            .post::<_, Value>(GRAPHQL_ROUTE, Some(&payload))
            .await
        {
            Ok(body) => body,
            Err(error) => {
                return Err(self
                    .map_octocrab_error_with_rate_limit("graphql", &error)
                    .await);
            }
        };
        graphql_data(body)
    }
}
