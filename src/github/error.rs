//! Error types exposed by the GitHub access layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while configuring the client or communicating with GitHub.
///
/// "Not found" outcomes are not errors: public lookups report them through
/// `None`, empty collections or [`Lookup`](super::Lookup) sentinels. The
/// variants below cover configuration problems and failures the caller
/// cannot treat as a missing entity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No usable credential was configured.
    #[error("at least one GitHub token is required")]
    NoCredentials,

    /// A credential was blank.
    #[error("personal access token is required")]
    MissingToken,

    /// The query template directory could not be read.
    #[error("cannot load GraphQL queries from '{path}': {message}")]
    QueryDirectory {
        /// Directory that was scanned.
        path: String,
        /// Underlying I/O failure.
        message: String,
    },

    /// A named query template does not exist in the store.
    #[error("GraphQL query '{name}' is not available")]
    MissingQuery {
        /// Logical query name (base file name).
        name: String,
    },

    /// A base URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// GitHub answered with a client error other than authentication.
    #[error("GitHub could not find the resource: {message}")]
    NotFound {
        /// HTTP status code returned by GitHub.
        status: u16,
        /// Message returned with the response.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if available.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub returned a server error or an unexpected response.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body or status describing the failure.
        message: String,
    },

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("GraphQL query failed: {message}")]
    Query {
        /// Messages of the reported errors, joined with `; `.
        message: String,
    },

    /// A response did not have the expected shape.
    #[error("unexpected response from {operation}: {message}")]
    Decode {
        /// Operation whose response failed to decode.
        operation: String,
        /// Deserialisation failure detail.
        message: String,
    },

    /// Networking failed while calling a remote service.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ApiError {
    /// Returns true for GitHub-side 4xx answers.
    ///
    /// REST lookups treat these as "not found" signals rather than failures.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Authentication { .. } | Self::RateLimitExceeded { .. }
        )
    }
}
