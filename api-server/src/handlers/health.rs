//! Health check handler

use axum::Json;
use serde::Serialize;

use phishguard_core::model::{self, EngineStatus};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    classifier: EngineStatus,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        classifier: model::get_status(),
    })
}
