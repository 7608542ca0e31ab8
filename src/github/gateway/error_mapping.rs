//! Error mapping helpers for the Octocrab gateway.

use http::StatusCode;

use crate::github::error::ApiError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Maps a status and optional GitHub message onto the error taxonomy.
///
/// 401/403 become [`ApiError::Authentication`], other 4xx statuses become
/// [`ApiError::NotFound`] and everything else is an [`ApiError::Api`].
pub(crate) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ApiError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        ApiError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else if status.is_client_error() {
        ApiError::NotFound {
            status: status.as_u16(),
            message: format!("{operation} failed with status {status}: {message}"),
        }
    } else {
        ApiError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ApiError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, Some(source.message.clone()));
    }

    if is_network_error(error) {
        return ApiError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ApiError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a `reqwest` failure from the archive or stats lookups.
pub(crate) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> ApiError {
    if error.is_decode() {
        return ApiError::Decode {
            operation: operation.to_owned(),
            message: error.to_string(),
        };
    }

    if let Some(status) = error.status() {
        return map_http_error(operation, status, None);
    }

    ApiError::Network {
        message: format!("{operation} failed: {error}"),
    }
}
