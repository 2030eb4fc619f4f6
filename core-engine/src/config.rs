//! Engine configuration
//!
//! Every timeout is an explicit per-call parameter threaded into the probes;
//! nothing mutates process-wide socket state.

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_DNS_TIMEOUT_MS, DEFAULT_TLS_TIMEOUT_MS,
};
use crate::probes::retry::RetryPolicy;

/// Probe-engine tuning.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// DNS lookup timeout
    pub dns_timeout: Duration,

    /// TLS probe timeout per attempt
    pub tls_timeout: Duration,

    /// TLS probe retry policy
    pub tls_retry: RetryPolicy,

    /// Bound on concurrently in-flight URL tasks
    pub concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_millis(DEFAULT_DNS_TIMEOUT_MS),
            tls_timeout: Duration::from_millis(DEFAULT_TLS_TIMEOUT_MS),
            tls_retry: RetryPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults in `constants.rs`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            dns_timeout: env_ms("PROBE_DNS_TIMEOUT_MS").unwrap_or(defaults.dns_timeout),
            tls_timeout: env_ms("PROBE_TLS_TIMEOUT_MS").unwrap_or(defaults.tls_timeout),
            tls_retry: RetryPolicy {
                max_attempts: env_parse("PROBE_TLS_ATTEMPTS")
                    .unwrap_or(defaults.tls_retry.max_attempts),
                delay: env_ms("PROBE_RETRY_DELAY_MS").unwrap_or(defaults.tls_retry.delay),
            },
            concurrency: env_parse("PROBE_CONCURRENCY").unwrap_or(defaults.concurrency),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_ms(key: &str) -> Option<Duration> {
    env_parse::<u64>(key).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.dns_timeout, Duration::from_millis(2_000));
        assert_eq!(config.tls_timeout, Duration::from_millis(3_000));
        assert_eq!(config.tls_retry.max_attempts, 2);
        assert_eq!(config.concurrency, 10);
    }
}
