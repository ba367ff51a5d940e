//! Retry policy for paginated traversals.

use std::time::Duration;

/// What the pagination driver does after a counted page failure that is
/// still within the retry budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryMode {
    /// Stop the traversal and return the pages gathered so far without an
    /// error. The failed page is not requested again.
    #[default]
    Abandon,
    /// Wait for [`RetryPolicy::retry_delay`] and request the same page again.
    RetryPage,
}

/// Bounded retry behavior for [`fetch_all`](crate::RestClient::fetch_all).
///
/// One counter is kept per traversal. Every non-`NoContent` page failure
/// increments it, and the traversal fails with the last error once the
/// counter exceeds `max_retries`. The counter is never reset mid-traversal.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::{RetryMode, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(5)
///     .with_mode(RetryMode::RetryPage)
///     .with_retry_delay(Duration::from_millis(250));
///
/// assert_eq!(policy.max_retries(), 5);
/// assert_eq!(policy.mode(), RetryMode::RetryPage);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    mode: RetryMode,
    retry_delay: Duration,
    retry_remote_errors: bool,
}

impl RetryPolicy {
    /// Default number of page failures tolerated per traversal.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Creates a policy with the given budget and default settings otherwise.
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            mode: RetryMode::Abandon,
            retry_delay: Duration::ZERO,
            retry_remote_errors: true,
        }
    }

    /// Sets the retry mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: RetryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the wait before a page is requested again in
    /// [`RetryMode::RetryPage`].
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets whether API-level (`status != 0`) errors count against the
    /// budget. When `false` they end the traversal immediately.
    #[must_use]
    pub const fn with_retry_remote_errors(mut self, retry: bool) -> Self {
        self.retry_remote_errors = retry;
        self
    }

    /// Returns the maximum number of tolerated page failures.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the retry mode.
    #[must_use]
    pub const fn mode(&self) -> RetryMode {
        self.mode
    }

    /// Returns the delay used by [`RetryMode::RetryPage`].
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns whether API-level errors are retried.
    #[must_use]
    pub const fn retry_remote_errors(&self) -> bool {
        self.retry_remote_errors
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_RETRIES)
    }
}
