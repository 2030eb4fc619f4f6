//! Central configuration constants
//!
//! Single source of truth for probe-engine defaults. Environment overrides
//! live in `config.rs`.

/// Scheme prepended to inputs that arrive without one.
pub const DEFAULT_SCHEME: &str = "http://";

/// Default DNS lookup timeout (milliseconds).
pub const DEFAULT_DNS_TIMEOUT_MS: u64 = 2_000;

/// Default TLS probe timeout per attempt (milliseconds).
pub const DEFAULT_TLS_TIMEOUT_MS: u64 = 3_000;

/// Default TLS probe attempts (first try + retries).
pub const DEFAULT_TLS_ATTEMPTS: u32 = 2;

/// Default fixed delay between TLS probe attempts (milliseconds).
pub const DEFAULT_RETRY_DELAY_MS: u64 = 50;

/// Default bound on concurrently in-flight URL tasks. Too high risks
/// outbound connection exhaustion, too low serializes handshake latency.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Grace added on top of a probe's own budget before the assembler cuts it
/// off (milliseconds).
pub const PROBE_GRACE_MS: u64 = 250;

/// Port probed for TLS certificates.
pub const HTTPS_PORT: u16 = 443;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
