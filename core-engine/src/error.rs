//! Engine boundary errors
//!
//! Probe failures never reach this type; they are encoded as feature values.
//! `EngineError` covers only caller contract violations and construction
//! failures, which are fatal at the boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid concurrency {0}: the worker pool needs at least one slot")]
    InvalidConcurrency(usize),

    #[error("failed to initialize TLS connector: {0}")]
    TlsInit(#[from] native_tls::Error),
}
