//! Health check handler

use axum::{extract::State, Json};
use dropout_core::ModelMetadata;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model: String,
    /// Absent for classifiers that are not file-backed
    model_info: Option<ModelMetadata>,
    inference_count: u64,
    recommendations_enabled: bool,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model: state.classifier.name().to_string(),
        model_info: state.classifier.metadata().cloned(),
        inference_count: state.classifier.inference_count(),
        recommendations_enabled: state.advisor.is_enabled(),
    })
}
