//! Feature Assembler
//!
//! Orchestrates one URL: normalize + parse, run the lexical pass, run both
//! network probes concurrently under their own budgets, and merge everything
//! into a schema-complete record. `assemble` is total — network failure is a
//! feature value here, never an error, and a misbehaving probe is cut off at
//! its budget without touching its sibling.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::constants::PROBE_GRACE_MS;
use crate::error::EngineError;
use crate::features::{
    FeatureExtractor, FeatureRecord, FeatureVector, LexicalFeatures, NetworkFeatures,
};
use crate::probes::{CertProbe, DnsResolver, HostResolve, ProbeOutcome, TlsProber};
use crate::url::ParsedUrl;

pub struct FeatureAssembler {
    config: EngineConfig,
    resolver: Arc<dyn HostResolve>,
    prober: Arc<dyn CertProbe>,
}

impl FeatureAssembler {
    /// Assembler with the real DNS and TLS probes.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let prober = TlsProber::new(config.tls_retry.clone())?;

        Ok(Self::with_probes(
            config,
            Arc::new(DnsResolver::new()),
            Arc::new(prober),
        ))
    }

    /// Assembler over caller-supplied probe implementations.
    pub fn with_probes(
        config: EngineConfig,
        resolver: Arc<dyn HostResolve>,
        prober: Arc<dyn CertProbe>,
    ) -> Self {
        Self {
            config,
            resolver,
            prober,
        }
    }

    /// Derive the complete feature record for one URL.
    pub async fn assemble(&self, input: &str) -> FeatureRecord {
        let parsed = ParsedUrl::from_input(input);
        let lexical = LexicalFeatures::from_url(&parsed);

        let network = match parsed.host.as_deref() {
            Some(host) => self.probe_host(host).await,
            None => NetworkFeatures::unreachable(),
        };

        let mut vector = FeatureVector::new();
        lexical.extract(&mut vector);
        network.extract(&mut vector);

        FeatureRecord::new(parsed.normalized, vector)
    }

    /// Run both probes concurrently, each contained by its worst-case
    /// budget plus a small grace. Expiry of one budget substitutes `Failed`
    /// for that probe only.
    async fn probe_host(&self, host: &str) -> NetworkFeatures {
        let grace = Duration::from_millis(PROBE_GRACE_MS);
        let dns_budget = self.config.dns_timeout + grace;
        let tls_budget = self.config.tls_retry.total_budget(self.config.tls_timeout) + grace;

        let (dns, cert) = tokio::join!(
            contained(
                self.resolver.resolve(host, self.config.dns_timeout),
                dns_budget,
                "dns",
                host,
            ),
            contained(
                self.prober.probe(host, self.config.tls_timeout),
                tls_budget,
                "tls",
                host,
            ),
        );

        NetworkFeatures { dns, cert }
    }
}

async fn contained(
    probe: impl Future<Output = ProbeOutcome>,
    budget: Duration,
    kind: &str,
    host: &str,
) -> ProbeOutcome {
    match tokio::time::timeout(budget, probe).await {
        Ok(outcome) => outcome,
        Err(_) => {
            log::debug!("{} probe exceeded its {:?} budget for {}", kind, budget, host);
            ProbeOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FEATURE_COUNT, FEATURE_LAYOUT};
    use crate::probes::stub::{HangingProbe, StaticProbe};
    use std::time::Instant;

    fn assembler(outcome: ProbeOutcome) -> FeatureAssembler {
        let probe = Arc::new(StaticProbe(outcome));
        FeatureAssembler::with_probes(EngineConfig::default(), probe.clone(), probe)
    }

    #[tokio::test]
    async fn test_record_is_schema_complete_for_any_input() {
        let assembler = assembler(ProbeOutcome::Verified);

        for input in ["", "   ", "example.com", "http://a.b.c/d", ":::", "häh"] {
            let record = assembler.assemble(input).await;
            assert_eq!(record.vector.values.len(), FEATURE_COUNT);
            assert!(record.vector.is_compatible());
            for name in FEATURE_LAYOUT {
                assert!(record.get(name).is_some(), "missing {} for {:?}", name, input);
            }
        }
    }

    #[tokio::test]
    async fn test_unreachable_probes_set_suspicious_sentinels() {
        let record = assembler(ProbeOutcome::Failed)
            .assemble("http://example.com")
            .await;

        assert_eq!(record.get("dns_record"), Some(1.0));
        assert_eq!(record.get("ssl_certificate"), Some(1.0));
    }

    #[tokio::test]
    async fn test_verified_probes_clear_trust_bits() {
        let record = assembler(ProbeOutcome::Verified)
            .assemble("https://example.com")
            .await;

        assert_eq!(record.get("dns_record"), Some(0.0));
        assert_eq!(record.get("ssl_certificate"), Some(0.0));
        assert_eq!(record.get("ssl_final_state"), Some(0.0));
    }

    #[tokio::test]
    async fn test_hostless_input_never_probes() {
        // A hanging probe would stall this test if it were ever called.
        let probe = Arc::new(HangingProbe);
        let assembler =
            FeatureAssembler::with_probes(EngineConfig::default(), probe.clone(), probe);

        let record = assembler.assemble("").await;
        assert_eq!(record.get("dns_record"), Some(1.0));
        assert_eq!(record.get("ssl_certificate"), Some(1.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_probe_is_contained_by_budget() {
        let probe = Arc::new(HangingProbe);
        let config = EngineConfig::default();
        let budget = config.tls_retry.total_budget(config.tls_timeout)
            + Duration::from_millis(PROBE_GRACE_MS);
        let assembler = FeatureAssembler::with_probes(config, probe.clone(), probe);

        let started = Instant::now();
        let record = assembler.assemble("http://example.com").await;

        // paused clock: elapsed time is exactly the auto-advanced budget
        assert!(started.elapsed() <= budget + Duration::from_secs(1));
        assert_eq!(record.get("dns_record"), Some(1.0));
        assert_eq!(record.get("ssl_certificate"), Some(1.0));
    }

    #[tokio::test]
    async fn test_lexical_features_idempotent_across_calls() {
        let assembler = assembler(ProbeOutcome::Verified);
        let first = assembler.assemble("http://a.example.com/login").await;
        let second = assembler.assemble("http://a.example.com/login").await;
        assert_eq!(first, second);
    }
}
