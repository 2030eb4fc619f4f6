//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the pretrained phishing classifier and scores one feature vector at
//! a time. Model absence and layout mismatch are errors for the caller to
//! surface; they are never folded into probe-level degradation.

use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::features::{FeatureVector, FEATURE_COUNT};

/// Decision threshold on the phishing probability.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Latency stats
static LATENCY_SUM: AtomicU64 = AtomicU64::new(0);
static INFERENCE_COUNT: AtomicU64 = AtomicU64::new(0);

/// ONNX Session (loaded model)
static ONNX_SESSION: RwLock<Option<Session>> = RwLock::new(None);

/// Model metadata
static MODEL_METADATA: RwLock<Option<ModelMetadata>> = RwLock::new(None);

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub features: usize,
    pub threshold: f32,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Classifier verdict for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 1 = phishing, 0 = legitimate
    pub label: u8,
    /// Phishing probability, when the model emits one
    pub probability: Option<f32>,
    pub threshold: f32,
    pub inference_time_us: u64,
}

/// Engine status for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub inference_device: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

/// Load the ONNX model from a file.
pub fn load_model(model_path: &str) -> Result<(), InferenceError> {
    log::info!("Loading ONNX model from: {}", model_path);

    if !std::path::Path::new(model_path).exists() {
        return Err(InferenceError(format!("Model not found: {}", model_path)));
    }

    let session = Session::builder()
        .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
        .commit_from_file(model_path)
        .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

    log::info!("ONNX model loaded successfully");

    *ONNX_SESSION.write() = Some(session);
    *MODEL_METADATA.write() = Some(ModelMetadata {
        model_path: model_path.to_string(),
        features: FEATURE_COUNT,
        threshold: DEFAULT_THRESHOLD,
        loaded_at: chrono::Utc::now(),
    });

    Ok(())
}

/// Check if a model is loaded.
pub fn is_model_loaded() -> bool {
    ONNX_SESSION.read().is_some()
}

/// Unload the model.
pub fn unload_model() {
    *ONNX_SESSION.write() = None;
    *MODEL_METADATA.write() = None;
    log::info!("ONNX model unloaded");
}

/// Get model metadata.
pub fn get_metadata() -> Option<ModelMetadata> {
    MODEL_METADATA.read().clone()
}

pub fn get_status() -> EngineStatus {
    let metadata = MODEL_METADATA.read();
    let (loaded, name) = if let Some(meta) = metadata.as_ref() {
        (true, meta.model_path.clone())
    } else {
        (false, "None".to_string())
    };

    let sum = LATENCY_SUM.load(Ordering::Relaxed);
    let count = INFERENCE_COUNT.load(Ordering::Relaxed);
    let avg = if count > 0 {
        (sum as f32 / count as f32) / 1000.0
    } else {
        0.0
    };

    EngineStatus {
        model_loaded: loaded,
        model_name: name,
        inference_device: "ONNX Runtime (CPU)".to_string(),
        avg_latency_ms: avg,
        inference_count: count,
    }
}

/// Score one feature vector against the loaded model.
///
/// The vector's layout must match this build's schema; a record extracted
/// under a different layout cannot be scored.
pub fn predict(vector: &FeatureVector) -> Result<PredictionResult, InferenceError> {
    let start_time = std::time::Instant::now();

    vector
        .validate()
        .map_err(|e| InferenceError(e.to_string()))?;

    let mut session_guard = ONNX_SESSION.write();
    let session = session_guard
        .as_mut()
        .ok_or_else(|| InferenceError("Model not loaded".to_string()))?;

    let threshold = MODEL_METADATA
        .read()
        .as_ref()
        .map(|m| m.threshold)
        .unwrap_or(DEFAULT_THRESHOLD);

    let output_names: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();
    if output_names.is_empty() {
        return Err(InferenceError("No output defined".to_string()));
    }

    let input_array =
        Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), vector.as_slice().to_vec())
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

    let input_tensor =
        Value::from_array(input_array).map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

    let outputs = session
        .run(ort::inputs![input_tensor])
        .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

    // Classifier exports carry a label tensor plus (usually) a probability
    // tensor; take whichever of each is extractable.
    let mut probability: Option<f32> = None;
    let mut label: Option<i64> = None;

    for name in &output_names {
        let Some(output) = outputs.get(name) else {
            continue;
        };

        if probability.is_none() {
            if let Ok(tensor) = output.try_extract_tensor::<f32>() {
                let data = tensor.1;
                if data.len() >= 2 {
                    // [p_legitimate, p_phishing]
                    probability = Some(data[data.len() - 1]);
                } else if let Some(&score) = data.first() {
                    probability = Some(score);
                }
                continue;
            }
        }

        if label.is_none() {
            if let Ok(tensor) = output.try_extract_tensor::<i64>() {
                label = tensor.1.first().copied();
            }
        }
    }

    let label = match (probability, label) {
        (Some(p), _) => u8::from(p >= threshold),
        (None, Some(l)) => u8::from(l != 0),
        (None, None) => {
            return Err(InferenceError("Model produced no usable output".to_string()))
        }
    };

    let inference_time = start_time.elapsed().as_micros() as u64;
    LATENCY_SUM.fetch_add(inference_time, Ordering::Relaxed);
    INFERENCE_COUNT.fetch_add(1, Ordering::Relaxed);

    Ok(PredictionResult {
        label,
        probability,
        threshold,
        inference_time_us: inference_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_without_model_is_an_error() {
        // No test ever loads a model, so the session stays empty.
        let err = predict(&FeatureVector::new()).unwrap_err();
        assert!(err.0.contains("not loaded"));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = load_model("/nonexistent/model.onnx").unwrap_err();
        assert!(err.0.contains("not found"));
    }

    #[test]
    fn test_status_reports_unloaded() {
        let status = get_status();
        assert!(!status.model_loaded);
        assert_eq!(status.model_name, "None");
    }
}
