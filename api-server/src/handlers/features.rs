//! Feature extraction handlers
//!
//! Probe failure never errors here — degraded records come back with their
//! suspicious sentinels set. Only malformed requests are rejected.

use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use phishguard_core::{BatchCoordinator, UrlInput};

use crate::models::{
    BatchRequest, BatchResponse, BatchResponseItem, ExtractRequest, ExtractResponse,
};
use crate::{AppResult, AppState};

/// Extract the feature record for a single URL
pub async fn extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> AppResult<Json<ExtractResponse>> {
    req.validate()?;

    let features = state.engine.assemble(&req.url).await;
    Ok(Json(ExtractResponse { features }))
}

/// Extract feature records for a batch of URLs
pub async fn extract_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> AppResult<Json<BatchResponse>> {
    let concurrency = req.concurrency.unwrap_or(state.config.engine.concurrency);
    let coordinator = BatchCoordinator::new(Arc::clone(&state.engine), concurrency)?;

    let inputs: Vec<UrlInput> = req
        .urls
        .into_iter()
        .map(|u| UrlInput {
            url: u.url,
            label: u.label,
        })
        .collect();

    let items = coordinator.run(inputs).await;

    Ok(Json(BatchResponse {
        count: items.len(),
        items: items.into_iter().map(BatchResponseItem::from).collect(),
    }))
}
