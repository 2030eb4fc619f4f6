//! Feature schema metadata handler
//!
//! Consumers align their columns against this instead of hardcoding names.

use axum::Json;

use phishguard_core::LayoutInfo;

pub async fn get() -> Json<LayoutInfo> {
    Json(LayoutInfo::current())
}
