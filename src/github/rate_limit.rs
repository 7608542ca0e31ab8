//! Rate limit information reported by GitHub.
//!
//! `RateLimitInfo` captures the core quota of one credential. The diagnostics
//! lookup collects one of these per configured token into a
//! [`RateLimitReport`].

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

/// Rate limit information for a single credential.
///
/// # Example
///
/// ```
/// use gitbot::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(5000, 4999, 1700000000);
/// assert!(!info.is_exhausted());
/// assert_eq!(info.remaining(), 4999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    limit: u32,
    /// Remaining requests in the current window.
    remaining: u32,
    /// Unix timestamp when the rate limit resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit info instance.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Returns the maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the Unix timestamp when the rate limit resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true if the rate limit has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Calculates seconds until the rate limit resets.
    ///
    /// Returns 0 if the reset time has already passed or if the system time
    /// cannot be determined.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0);

        self.reset_at.saturating_sub(now)
    }
}

/// Rate limit status of every configured credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitReport {
    /// One entry per credential, in configuration order.
    pub per_token: Vec<RateLimitInfo>,
    /// Number of configured credentials.
    pub token_count: usize,
}

impl RateLimitReport {
    /// Sum of the remaining requests across all credentials.
    #[must_use]
    pub fn total_remaining(&self) -> u64 {
        self.per_token
            .iter()
            .map(|info| u64::from(info.remaining()))
            .sum()
    }
}

/// `/rate_limit` response body; only the core quota is read.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRateLimit {
    pub(crate) rate: ApiRate,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRate {
    pub(crate) limit: u32,
    pub(crate) remaining: u32,
    pub(crate) reset: u64,
}

impl From<ApiRateLimit> for RateLimitInfo {
    fn from(value: ApiRateLimit) -> Self {
        Self::new(value.rate.limit, value.rate.remaining, value.rate.reset)
    }
}
