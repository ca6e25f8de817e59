//! Transport-level retry with exponential backoff.
//!
//! Applied inside the client's send path only. Lifecycle and
//! reconciliation code never retries: a pass either converges or
//! surfaces its first fatal error to the caller.

use std::time::Duration;
use tracing::{debug, warn};

use oktide_core::{OktaError, OktaResult};

/// Retry policy for requests against the Okta API.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (0 = no retries).
    pub max_retries: u32,
    /// Base delay in seconds for exponential backoff.
    pub base_delay_secs: u64,
    /// Maximum delay cap in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            base_delay_secs: 1,
            max_delay_secs: 60,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry count and base delay; the
    /// delay cap defaults to 60 seconds.
    #[must_use]
    pub fn new(max_retries: u32, base_delay_secs: u64) -> Self {
        Self {
            max_retries,
            base_delay_secs,
            max_delay_secs: 60,
        }
    }

    /// A policy that never retries. Every error propagates immediately.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay_secs: 0,
            max_delay_secs: 0,
        }
    }

    /// Whether the error should be retried at the given attempt number.
    ///
    /// Only rate limiting, network failures, and server-side 5xx responses
    /// qualify; not-found and other client errors never do.
    #[must_use]
    pub fn should_retry(&self, attempt: u32, error: &OktaError) -> bool {
        if attempt >= self.max_retries {
            return false;
        }
        error.is_retryable() || error.is_server_error()
    }

    /// Delay before the next attempt.
    ///
    /// A rate-limit error carrying `Retry-After` uses that value directly
    /// (capped at `max_delay_secs`); everything else backs off as
    /// `base_delay_secs * 2^attempt`, also capped.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, error: &OktaError) -> Duration {
        let secs = if let OktaError::RateLimited {
            retry_after_secs: Some(retry_after),
        } = error
        {
            (*retry_after).min(self.max_delay_secs)
        } else {
            self.base_delay_secs
                .saturating_mul(2u64.saturating_pow(attempt))
                .min(self.max_delay_secs)
        };
        Duration::from_secs(secs)
    }

    /// Run an async operation under this policy.
    ///
    /// The closure is invoked until it succeeds, a non-retryable error
    /// occurs, or the retry budget is exhausted (which yields
    /// [`OktaError::MaxRetriesExceeded`]).
    pub async fn execute<F, Fut, T>(&self, operation: &str, mut f: F) -> OktaResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = OktaResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match f().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(
                            operation,
                            attempt = attempt + 1,
                            "Request succeeded after retries"
                        );
                    }
                    return Ok(value);
                }
                Err(error) => {
                    // Non-retryable errors keep their classification; a
                    // not-found must never come back as anything else.
                    if !error.is_retryable() && !error.is_server_error() {
                        return Err(error);
                    }

                    if attempt >= self.max_retries {
                        if self.max_retries == 0 {
                            return Err(error);
                        }
                        warn!(
                            operation,
                            attempts = attempt + 1,
                            error = %error,
                            "Retry budget exhausted"
                        );
                        return Err(OktaError::MaxRetriesExceeded {
                            attempts: attempt + 1,
                            message: format!(
                                "{operation} failed after {} attempt(s): {error}",
                                attempt + 1
                            ),
                        });
                    }

                    let delay = self.delay_for(attempt, &error);
                    debug!(
                        operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_secs = delay.as_secs(),
                        error = %error,
                        "Retrying after transient error"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
