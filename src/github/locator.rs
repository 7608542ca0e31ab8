//! Identifier parsing and identity wrappers for GitHub lookups.

use url::Url;

use super::error::ApiError;

/// Public GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Returns `value` when it can be placed verbatim in a REST route as one
/// path segment.
///
/// Empty values, `.` and `..`, and values holding a path separator, a URL
/// delimiter, a percent escape or whitespace are rejected.
pub(crate) fn path_segment(value: &str) -> Option<&str> {
    let unsafe_segment = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '?', '#', '%'])
        || value.chars().any(char::is_whitespace);
    (!unsafe_segment).then_some(value)
}

/// Returns true when every `/`-separated part of `path` is a safe segment.
///
/// Empty parts are tolerated so `a//b` keeps its GitHub meaning.
pub(crate) fn is_relative_path(path: &str) -> bool {
    path.split('/')
        .all(|part| part.is_empty() || path_segment(part).is_some())
}

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    fn new(value: &str) -> Option<Self> {
        path_segment(value).map(|segment| Self(segment.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str) -> Option<Self> {
        path_segment(value).map(|segment| Self(segment.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository identifier in `owner/name` form.
///
/// Chat users type repositories as `owner/name`. Anything else (no slash,
/// several slashes, an empty half) is not a repository and lookups treat it
/// as "not found" without contacting GitHub.
///
/// # Example
///
/// ```
/// use gitbot::github::RepositorySlug;
///
/// let slug = RepositorySlug::parse("rust-lang/rust").expect("valid slug");
/// assert_eq!(slug.owner().as_str(), "rust-lang");
/// assert_eq!(slug.name().as_str(), "rust");
/// assert!(RepositorySlug::parse("rust-lang").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositorySlug {
    /// Parses an `owner/name` string.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let (owner_segment, name_segment) = input.split_once('/')?;
        if name_segment.contains('/') {
            return None;
        }

        Some(Self {
            owner: RepositoryOwner::new(owner_segment)?,
            name: RepositoryName::new(name_segment)?,
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }

    pub(crate) fn contents_path(&self) -> String {
        format!(
            "/repos/{}/{}/contents",
            self.owner.as_str(),
            self.name.as_str()
        )
    }

    pub(crate) fn zipball_path(&self) -> String {
        format!(
            "/repos/{}/{}/zipball",
            self.owner.as_str(),
            self.name.as_str()
        )
    }
}

impl std::fmt::Display for RepositorySlug {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}/{}", self.owner.as_str(), self.name.as_str())
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ApiError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApiError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Parses a base URL and strips any trailing slash from its path.
///
/// # Errors
///
/// Returns [`ApiError::InvalidUrl`] when `input` is not an absolute URL.
pub fn parse_base_url(input: &str) -> Result<Url, ApiError> {
    let mut parsed = Url::parse(input).map_err(|error| ApiError::InvalidUrl(error.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{input} cannot be a base URL")));
    }
    let trimmed = parsed.path().trim_end_matches('/').to_owned();
    parsed.set_path(&trimmed);
    Ok(parsed)
}

/// Joins a base URL and an absolute route without doubling slashes.
pub(crate) fn join_route(base: &Url, route: &str) -> String {
    format!(
        "{}{}",
        base.as_str().trim_end_matches('/'),
        route
    )
}
