//! Request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use phishguard_core::{BatchItem, FeatureRecord};

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub url: String,
    /// 1 = phishing, 0 = legitimate
    pub prediction: u8,
    pub probability: Option<f32>,
    pub verdict: &'static str,
    pub features: FeatureRecord,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExtractRequest {
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub features: FeatureRecord,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub urls: Vec<BatchUrl>,
    /// Override of the configured pool bound
    pub concurrency: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct BatchUrl {
    pub url: String,
    pub label: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub count: usize,
    /// Items in completion order; re-sort by `url` for submission order
    pub items: Vec<BatchResponseItem>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponseItem {
    pub url: String,
    pub label: Option<i32>,
    pub features: FeatureRecord,
}

impl From<BatchItem> for BatchResponseItem {
    fn from(item: BatchItem) -> Self {
        Self {
            url: item.url,
            label: item.label,
            features: item.record,
        }
    }
}
