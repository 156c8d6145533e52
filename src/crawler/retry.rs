//! Capped retry with exponential backoff
//!
//! Wiki fetches fail transiently and sometimes return truncated documents.
//! Both show up as retryable errors; the policy repeats the whole operation
//! until it succeeds, a non-retryable error occurs, or the attempts run out.

use crate::config::CrawlerConfig;
use crate::ShelfError;
use std::future::Future;
use std::time::Duration;

/// How often and how patiently to repeat a failing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Delay to wait before attempt number `attempt` (1-based)
    ///
    /// The first attempt starts immediately; after that the delay starts at
    /// `base_delay` and doubles each time, capped at `max_delay`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }

        let factor = 1u32.checked_shl(attempt - 2).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Runs `op` until it succeeds or the policy gives up
    ///
    /// Errors for which [`ShelfError::is_retryable`] is false are returned as-is.
    /// When the attempts are used up the last error is folded into
    /// [`ShelfError::RetriesExhausted`] for `target`.
    pub async fn run<T, F, Fut>(&self, target: &str, mut op: F) -> Result<T, ShelfError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ShelfError>>,
    {
        let mut attempt = 1;
        loop {
            let delay = self.delay_before(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= self.max_attempts => {
                    return Err(ShelfError::RetriesExhausted {
                        target: target.to_string(),
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt,
                        self.max_attempts,
                        target,
                        e
                    );
                    attempt += 1;
                }
            }
        }
    }
}

impl ShelfError {
    /// Returns true for failures a later attempt may not hit
    ///
    /// Transport errors, non-success statuses and malformed documents are
    /// retryable; everything else is terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::HttpStatus { .. } | Self::Malformed { .. }
        )
    }
}
