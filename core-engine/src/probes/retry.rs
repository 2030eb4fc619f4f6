//! Retry policy for the certificate prober
//!
//! Explicit attempts + fixed inter-attempt delay, so total probe wall time
//! stays provably bounded and tests can reason about it without sleeping.

use std::time::Duration;

use crate::constants::{DEFAULT_RETRY_DELAY_MS, DEFAULT_TLS_ATTEMPTS};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_TLS_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Whether another attempt is allowed after `attempt` (0-based) failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }

    /// Worst-case wall time for a probe whose every attempt runs to
    /// `per_attempt`: attempts plus the inter-attempt delays.
    pub fn total_budget(&self, per_attempt: Duration) -> Duration {
        let attempts = self.max_attempts.max(1);
        per_attempt * attempts + self.delay * (attempts - 1)
    }
}
