//! Prediction handler
//!
//! Extracts features, then scores them with the loaded classifier. A missing
//! or schema-incompatible model is a 503, kept distinct from probe-level
//! degradation (which is encoded in the features themselves).

use axum::{extract::State, Json};
use validator::Validate;

use phishguard_core::model;

use crate::models::{PredictRequest, PredictResponse};
use crate::{AppError, AppResult, AppState};

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    req.validate()?;

    let features = state.engine.assemble(&req.url).await;
    let result =
        model::predict(&features.vector).map_err(|e| AppError::ModelUnavailable(e.to_string()))?;

    tracing::debug!(
        "scored {} -> label {} (p = {:?}) in {}us",
        features.url,
        result.label,
        result.probability,
        result.inference_time_us
    );

    Ok(Json(PredictResponse {
        url: req.url,
        prediction: result.label,
        probability: result.probability,
        verdict: if result.label == 1 { "phishing" } else { "legitimate" },
        features,
    }))
}
