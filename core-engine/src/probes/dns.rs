//! Host Resolver - forward DNS reachability probe
//!
//! Single lookup, no retries (the resolver's own retransmit is disabled),
//! and every error path collapses to an outcome. Unresolvable hosts are the
//! normal case for phishing URLs, so nothing here is worth more than a debug
//! log line.

use std::time::Duration;

use async_trait::async_trait;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use super::{HostResolve, ProbeOutcome};

pub struct DnsResolver {
    resolver: TokioAsyncResolver,
}

impl DnsResolver {
    /// System-default upstream configuration, one attempt per lookup.
    pub fn new() -> Self {
        let mut opts = ResolverOpts::default();
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostResolve for DnsResolver {
    async fn resolve(&self, host: &str, timeout: Duration) -> ProbeOutcome {
        if host.is_empty() {
            return ProbeOutcome::Failed;
        }

        match tokio::time::timeout(timeout, self.resolver.lookup_ip(host)).await {
            Ok(Ok(lookup)) => {
                if lookup.iter().next().is_some() {
                    ProbeOutcome::Verified
                } else {
                    ProbeOutcome::Unverified
                }
            }
            Ok(Err(e)) => {
                log::debug!("dns lookup failed for {}: {}", host, e);
                ProbeOutcome::Failed
            }
            Err(_) => {
                log::debug!("dns lookup timed out for {} after {:?}", host, timeout);
                ProbeOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_host_is_failed() {
        let resolver = DnsResolver::new();
        let outcome = resolver.resolve("", Duration::from_secs(1)).await;
        assert_eq!(outcome, ProbeOutcome::Failed);
    }
}
