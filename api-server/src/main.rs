//! PhishGuard API Server
//!
//! HTTP surface over the probe engine and classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      PHISHGUARD API                        │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌────────────────┐   ┌──────────────────┐ │
//! │  │  API     │   │ Feature Probe  │   │  Classifier      │ │
//! │  │  Gateway │──▶│ Engine         │──▶│  (ONNX model)    │ │
//! │  │  (Axum)  │   │ (DNS/TLS pool) │   │                  │ │
//! │  └──────────┘   └────────────────┘   └──────────────────┘ │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Probe degradation is encoded in feature values and never fails a request;
//! only a missing/incompatible classifier surfaces as 503.

mod config;
mod error;
mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard_core::{model, FeatureAssembler};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishguard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("PhishGuard API server starting...");

    // Load the classifier; the extraction endpoints work without it
    match model::load_model(&config.model_path) {
        Ok(()) => tracing::info!("Classifier loaded from {}", config.model_path),
        Err(e) => tracing::warn!("Classifier unavailable ({}); /predict will return 503", e),
    }

    // Build the probe engine once; the TLS connector and resolver are shared
    let assembler = FeatureAssembler::new(config.engine.clone())
        .expect("Failed to initialize probe engine");

    let state = AppState {
        engine: Arc::new(assembler),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<FeatureAssembler>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/schema", get(handlers::schema::get))
        .route("/api/v1/features", post(handlers::features::extract))
        .route("/api/v1/features/batch", post(handlers::features::extract_batch))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
