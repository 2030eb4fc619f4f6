//! Batch Coordinator
//!
//! Fans a collection of URLs across a bounded pool of concurrent assembly
//! tasks. The semaphore is the only shared state and the only backpressure
//! mechanism; results come back in completion order, one per input, with
//! per-URL problems encoded in the record rather than aborting the batch.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::assemble::FeatureAssembler;
use crate::error::EngineError;
use crate::features::FeatureRecord;

/// One batch input: a URL plus an optional training label, passed through
/// unchanged.
#[derive(Debug, Clone)]
pub struct UrlInput {
    pub url: String,
    pub label: Option<i32>,
}

impl UrlInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
        }
    }

    pub fn labeled(url: impl Into<String>, label: i32) -> Self {
        Self {
            url: url.into(),
            label: Some(label),
        }
    }
}

/// One batch output, keyed by the original input URL so callers that need
/// submission order can re-sort.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub url: String,
    pub label: Option<i32>,
    pub record: FeatureRecord,
}

pub struct BatchCoordinator {
    assembler: Arc<FeatureAssembler>,
    concurrency: usize,
}

impl BatchCoordinator {
    /// A zero-width pool can never make progress; reject it at the boundary.
    pub fn new(assembler: Arc<FeatureAssembler>, concurrency: usize) -> Result<Self, EngineError> {
        if concurrency == 0 {
            return Err(EngineError::InvalidConcurrency(concurrency));
        }

        Ok(Self {
            assembler,
            concurrency,
        })
    }

    /// Assemble every input, at most `concurrency` in flight, yielding
    /// results as tasks complete.
    pub async fn run(&self, inputs: Vec<UrlInput>) -> Vec<BatchItem> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        let total = inputs.len();
        for input in inputs {
            let semaphore = semaphore.clone();
            let assembler = self.assembler.clone();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("batch semaphore closed");
                let record = assembler.assemble(&input.url).await;

                BatchItem {
                    url: input.url,
                    label: input.label,
                    record,
                }
            });
        }

        let mut items = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(item) => items.push(item),
                Err(e) => log::error!("assembly task failed: {}", e),
            }
        }

        items
    }
}
