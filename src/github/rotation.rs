//! Round-robin rotation across API credentials.
//!
//! GitHub enforces rate limits per token. The bot spreads requests across
//! every configured token by handing out the next entry of a fixed list on
//! each call. The cursor is the only shared mutable state of the access layer
//! and is updated atomically, so one rotator can serve concurrent lookups.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::ApiError;
use super::locator::PersonalAccessToken;

/// Fixed, non-empty list of entries handed out in round-robin order.
///
/// # Example
///
/// ```
/// use gitbot::github::TokenRotator;
///
/// let rotator = TokenRotator::new(vec!["a", "b"]).expect("non-empty list");
/// assert_eq!(*rotator.next_entry(), "a");
/// assert_eq!(*rotator.next_entry(), "b");
/// assert_eq!(*rotator.next_entry(), "a");
/// ```
#[derive(Debug)]
pub struct TokenRotator<T> {
    head: T,
    tail: Vec<T>,
    cursor: AtomicUsize,
}

impl<T> TokenRotator<T> {
    /// Creates a rotator over `entries`, starting at the first one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoCredentials`] when `entries` is empty.
    pub fn new(entries: Vec<T>) -> Result<Self, ApiError> {
        let mut remaining = entries.into_iter();
        let head = remaining.next().ok_or(ApiError::NoCredentials)?;
        Ok(Self {
            head,
            tail: remaining.collect(),
            cursor: AtomicUsize::new(0),
        })
    }

    /// Returns the next entry and advances the cursor, wrapping after the last.
    pub fn next_entry(&self) -> &T {
        let len = self.len();
        let (Ok(index) | Err(index)) =
            self.cursor
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                    let advanced = current + 1;
                    Some(if advanced >= len { 0 } else { advanced })
                });
        self.entry(index)
    }

    /// Number of entries in the rotation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Always false; a rotator cannot be built without entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the entries in configuration order without moving the cursor.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    fn entry(&self, index: usize) -> &T {
        match index.checked_sub(1) {
            None => &self.head,
            Some(offset) => self.tail.get(offset).unwrap_or(&self.head),
        }
    }
}

/// Builds the credential list from optional raw values.
///
/// Unset and blank values are skipped; the remaining tokens keep their order.
///
/// # Errors
///
/// Returns [`ApiError::NoCredentials`] when no usable token remains.
pub fn credentials_from<I, S>(values: I) -> Result<Vec<PersonalAccessToken>, ApiError>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let tokens: Vec<PersonalAccessToken> = values
        .into_iter()
        .flatten()
        .filter_map(|value| PersonalAccessToken::new(value).ok())
        .collect();

    if tokens.is_empty() {
        return Err(ApiError::NoCredentials);
    }
    Ok(tokens)
}
