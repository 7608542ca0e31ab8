//! Byte-capped download of repository zipballs.
//!
//! Chat attachments have a hard size limit, so the archive is streamed and
//! abandoned as soon as it grows past the threshold. The caller learns which
//! side of the threshold the archive fell on and, when it is too large, gets
//! exactly the first `limit` bytes.

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

use super::error::ApiError;
use super::gateway::map_reqwest_error;
use super::locator::PersonalAccessToken;

/// Default archive threshold: 7.85 MiB, rounded down.
pub const DEFAULT_ARCHIVE_LIMIT: usize = 8_231_321;

/// Outcome of probing a repository archive against the size threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveProbe {
    /// GitHub did not answer with 200.
    NotFound,
    /// The whole archive fits within the threshold.
    WithinLimit,
    /// The archive exceeded the threshold; holds exactly the first `limit`
    /// bytes.
    Oversized(Vec<u8>),
}

impl ArchiveProbe {
    /// Returns true when GitHub served the archive.
    #[must_use]
    pub const fn exists(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Streams the archive at `url` until it ends or passes `limit` bytes.
///
/// The request authenticates with `Authorization: token <token>`. Nothing is
/// retried.
///
/// # Errors
///
/// Returns [`ApiError::Network`] when the transfer fails or times out.
pub(crate) async fn probe_archive(
    client: &reqwest::Client,
    url: &str,
    token: &PersonalAccessToken,
    limit: usize,
) -> Result<ArchiveProbe, ApiError> {
    tracing::debug!(url, limit, "GET archive");
    let mut response = client
        .get(url)
        .header(AUTHORIZATION, format!("token {}", token.value()))
        .send()
        .await
        .map_err(|error| map_reqwest_error("archive", &error))?;

    if response.status() != StatusCode::OK {
        tracing::warn!(url, status = %response.status(), "archive unavailable");
        return Ok(ArchiveProbe::NotFound);
    }

    let mut prefix: Vec<u8> = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|error| map_reqwest_error("archive", &error))?
    {
        let room = limit.saturating_sub(prefix.len());
        if chunk.len() > room {
            prefix.extend(chunk.iter().take(room));
            tracing::debug!(url, limit, "archive exceeds limit");
            return Ok(ArchiveProbe::Oversized(prefix));
        }
        prefix.extend_from_slice(&chunk);
    }
    Ok(ArchiveProbe::WithinLimit)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{ArchiveProbe, probe_archive};
    use crate::github::error::ApiError;
    use crate::github::gateway::build_http_client;
    use crate::github::locator::PersonalAccessToken;

    const LIMIT: usize = 64;
    const ROUTE: &str = "/repos/octo/repo/zipball";

    async fn probe_with_body(body: Vec<u8>) -> Result<ArchiveProbe, ApiError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .and(header("authorization", "token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;

        let client = build_http_client("tester", Duration::from_secs(5))?;
        let token = PersonalAccessToken::new("secret")?;
        probe_archive(&client, &format!("{}{ROUTE}", server.uri()), &token, LIMIT).await
    }

    #[rstest]
    #[case::empty(0)]
    #[case::small(10)]
    #[case::exact(LIMIT)]
    #[tokio::test]
    async fn archives_up_to_the_limit_fit(#[case] size: usize) {
        let probe = probe_with_body(vec![7; size])
            .await
            .expect("probe should succeed");
        assert_eq!(probe, ArchiveProbe::WithinLimit);
    }

    #[rstest]
    #[case::one_over(LIMIT + 1)]
    #[case::far_over(LIMIT * 40)]
    #[tokio::test]
    async fn oversized_archives_yield_exact_prefix(#[case] size: usize) {
        let body: Vec<u8> = std::iter::repeat([1_u8, 2, 3]).flatten().take(size).collect();
        let expected: Vec<u8> = body.iter().copied().take(LIMIT).collect();

        let probe = probe_with_body(body).await.expect("probe should succeed");

        assert_eq!(probe, ArchiveProbe::Oversized(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn non_success_status_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = build_http_client("tester", Duration::from_secs(5)).expect("client");
        let token = PersonalAccessToken::new("secret").expect("token");

        let probe = probe_archive(&client, &format!("{}{ROUTE}", server.uri()), &token, LIMIT)
            .await
            .expect("probe should succeed");

        assert_eq!(probe, ArchiveProbe::NotFound);
        assert!(!probe.exists());
    }

    #[rstest]
    #[tokio::test]
    async fn slow_archive_times_out_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;
        let client = build_http_client("tester", Duration::from_millis(200)).expect("client");
        let token = PersonalAccessToken::new("secret").expect("token");

        let result =
            probe_archive(&client, &format!("{}{ROUTE}", server.uri()), &token, LIMIT).await;

        assert!(
            matches!(result, Err(ApiError::Network { .. })),
            "expected Network error, got {result:?}"
        );
    }
}
