//! Certificate Prober - TLS handshake against the HTTPS port
//!
//! Connects, handshakes against the system trust roots, and checks that the
//! peer presented a certificate. This is the latency-dominant probe (RTT +
//! handshake), hence the per-attempt timeout and bounded retry. Success is
//! never retried; every failure mode collapses to `Failed` after the policy
//! is exhausted.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::constants::HTTPS_PORT;
use crate::error::EngineError;

use super::retry::RetryPolicy;
use super::{CertProbe, ProbeOutcome};

pub struct TlsProber {
    connector: tokio_native_tls::TlsConnector,
    policy: RetryPolicy,
}

impl TlsProber {
    pub fn new(policy: RetryPolicy) -> Result<Self, EngineError> {
        let connector = native_tls::TlsConnector::builder().build()?;

        Ok(Self {
            connector: tokio_native_tls::TlsConnector::from(connector),
            policy,
        })
    }

    /// One connect + handshake + peer-certificate check.
    async fn attempt(&self, host: &str) -> Result<bool, ProbeError> {
        let socket = TcpStream::connect((host, HTTPS_PORT)).await?;
        let stream = self.connector.connect(host, socket).await?;
        let cert = stream.get_ref().peer_certificate()?;
        Ok(cert.is_some())
    }
}

#[async_trait]
impl CertProbe for TlsProber {
    async fn probe(&self, host: &str, timeout: Duration) -> ProbeOutcome {
        if host.is_empty() {
            return ProbeOutcome::Failed;
        }

        for attempt in 0..self.policy.max_attempts {
            match tokio::time::timeout(timeout, self.attempt(host)).await {
                Ok(Ok(true)) => return ProbeOutcome::Verified,
                Ok(Ok(false)) => return ProbeOutcome::Unverified,
                Ok(Err(e)) => {
                    log::debug!("tls probe attempt {} failed for {}: {}", attempt + 1, host, e)
                }
                Err(_) => log::debug!(
                    "tls probe attempt {} timed out for {} after {:?}",
                    attempt + 1,
                    host,
                    timeout
                ),
            }

            if self.policy.should_retry(attempt) {
                tokio::time::sleep(self.policy.delay).await;
            }
        }

        ProbeOutcome::Failed
    }
}

/// Internal attempt error; callers only ever see a `ProbeOutcome`.
#[derive(Debug, thiserror::Error)]
enum ProbeError {
    #[error("connect: {0}")]
    Io(#[from] std::io::Error),
    #[error("handshake: {0}")]
    Tls(#[from] native_tls::Error),
}
