//! Contribution statistics from the ghprofile service.
//!
//! The service reports profile views per period. Its counters sometimes
//! arrive as JSON strings, so they are decoded leniently. The set of periods
//! is not fixed: keys other than the four well-known ones are kept in
//! [`GhProfileStats::extra`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use url::Url;

use super::error::ApiError;
use super::gateway::{extract_github_message, map_http_error, map_reqwest_error};

/// Default base URL of the stats service.
pub const DEFAULT_GHPROFILE_BASE: &str = "https://api.ghprofile.me";

const OPERATION: &str = "ghprofile stats";

/// Period counters for one account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GhProfileStats {
    /// Count since tracking started.
    pub all_time: u64,
    /// Count over the last month.
    pub month: u64,
    /// Count over the last week.
    pub week: u64,
    /// Count over the last day.
    pub day: u64,
    /// Counters for any other period the service reported, keyed by name.
    pub extra: BTreeMap<String, u64>,
}

impl GhProfileStats {
    /// Sum of all period counters, including the extra ones.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.extra.values().fold(
            self.all_time
                .saturating_add(self.month)
                .saturating_add(self.week)
                .saturating_add(self.day),
            |sum, value| sum.saturating_add(*value),
        )
    }

    fn from_period(mut period: BTreeMap<String, u64>) -> Self {
        let mut take = |key: &str| period.remove(key).unwrap_or_default();
        let all_time = take("all_time");
        let month = take("month");
        let week = take("week");
        let day = take("day");
        Self {
            all_time,
            month,
            week,
            day,
            extra: period,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    payload: Option<StatsPayload>,
}

#[derive(Debug, Deserialize)]
struct StatsPayload {
    #[serde(default)]
    period: BTreeMap<String, Counter>,
}

/// A counter that may be sent as a number or a numeric string.
#[derive(Debug, Clone, Copy)]
struct Counter(u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCounter {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Counter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawCounter::deserialize(deserializer)? {
            RawCounter::Number(value) => Ok(Self(value)),
            RawCounter::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Returns true when `login` can be sent to the service verbatim.
pub(crate) fn is_queryable_login(login: &str) -> bool {
    !login.is_empty() && !login.contains(['/', '&'])
}

/// Fetches the period counters for `login`.
///
/// Logins containing `/` or `&` are rejected without a request. An
/// unsuccessful answer, a client error status or an answer whose counters
/// are all zero is reported as `None`.
///
/// # Errors
///
/// Returns [`ApiError::Network`] on transport failures, [`ApiError::Api`]
/// when the service answers with a server error and [`ApiError::Decode`]
/// when a successful body is not the expected JSON.
pub(crate) async fn fetch_stats(
    client: &reqwest::Client,
    base: &Url,
    login: &str,
) -> Result<Option<GhProfileStats>, ApiError> {
    if !is_queryable_login(login) {
        return Ok(None);
    }

    let url = format!("{}/historic/view", base.as_str().trim_end_matches('/'));
    tracing::debug!(%url, login, "GET stats");
    let response = client
        .get(&url)
        .query(&[("username", login)])
        .send()
        .await
        .map_err(|error| map_reqwest_error(OPERATION, &error))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| map_reqwest_error(OPERATION, &error))?;

    if status.is_client_error() {
        tracing::warn!(login, %status, "stats unavailable");
        return Ok(serde_json::from_str::<StatsResponse>(&body)
            .ok()
            .and_then(stats_from));
    }
    if !status.is_success() {
        return Err(map_http_error(
            OPERATION,
            status,
            extract_github_message(&body),
        ));
    }

    let decoded: StatsResponse =
        serde_json::from_str(&body).map_err(|error| ApiError::Decode {
            operation: OPERATION.to_owned(),
            message: error.to_string(),
        })?;
    Ok(stats_from(decoded))
}

fn stats_from(response: StatsResponse) -> Option<GhProfileStats> {
    if !response.success {
        return None;
    }
    let period: BTreeMap<String, u64> = response
        .payload?
        .period
        .into_iter()
        .map(|(key, Counter(value))| (key, value))
        .collect();
    if period.values().all(|value| *value == 0) {
        return None;
    }
    Some(GhProfileStats::from_period(period))
}
