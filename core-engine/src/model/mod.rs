//! Classifier module
//!
//! Wraps the pretrained ONNX model. The probe engine itself never depends on
//! this; callers (API server, CLI) decide whether a missing model is fatal.

pub mod inference;

pub use inference::{
    get_status, is_model_loaded, load_model, predict, unload_model, EngineStatus, InferenceError,
    ModelMetadata, PredictionResult,
};
