//! PhishGuard Core - URL Feature Probe Engine
//!
//! Derives a fixed, schema-ordered vector of lexical and network-probed
//! signals from URL strings, concurrently and under bounded time budgets,
//! and scores it with a pretrained classifier. Probe failure is a feature
//! value, never an error: `assemble` always returns a complete record.

pub mod assemble;
pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod model;
pub mod probes;
pub mod url;

pub use assemble::FeatureAssembler;
pub use batch::{BatchCoordinator, BatchItem, UrlInput};
pub use config::EngineConfig;
pub use error::EngineError;
pub use features::{FeatureRecord, FeatureVector, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use probes::ProbeOutcome;
