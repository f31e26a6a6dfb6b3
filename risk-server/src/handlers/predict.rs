//! Prediction handlers
//!
//! One request = validate → encode → classify → (optionally) recommend.
//! The form route and the JSON route share `run_prediction`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use dropout_core::{
    encode_profile, predict, PredictionResult, Recommendation, RiskLevel, Severity,
    StudentProfile,
};
use serde::Serialize;
use validator::Validate;

use crate::{AppState, AppResult};

/// Everything one prediction request produces
#[derive(Debug, Clone)]
pub struct Outcome {
    pub prediction: PredictionResult,
    pub recommendation: Recommendation,
}

#[derive(Debug, Serialize)]
pub struct RiskProbability {
    pub risk: &'static str,
    pub probability: f32,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub risk: RiskLevel,
    pub class_index: usize,
    pub severity: Severity,
    /// Low/Medium/High order
    pub probabilities: Vec<RiskProbability>,
    /// Percent, one decimal
    pub confidence: f32,
    pub recommendations_enabled: bool,
    pub recommendation: Option<String>,
    pub inference_time_us: u64,
}

impl From<Outcome> for PredictResponse {
    fn from(outcome: Outcome) -> Self {
        let Outcome { prediction, recommendation } = outcome;
        Self {
            risk: prediction.risk,
            class_index: prediction.class_index,
            severity: prediction.severity,
            probabilities: prediction
                .chart_bars()
                .map(|(risk, probability)| RiskProbability { risk, probability })
                .collect(),
            confidence: prediction.confidence_rounded(),
            recommendations_enabled: recommendation != Recommendation::Disabled,
            recommendation: recommendation.text().map(str::to_string),
            inference_time_us: prediction.inference_time_us,
        }
    }
}

/// Shared prediction path
pub async fn run_prediction(state: &AppState, profile: StudentProfile) -> AppResult<Outcome> {
    profile.validate()?;

    let row = encode_profile(&profile);
    tracing::debug!(features = %row.to_log_entry(), "Encoded profile");

    let classifier = state.classifier.clone();
    let prediction = tokio::task::spawn_blocking(move || predict(classifier.as_ref(), &row)).await??;

    tracing::info!(
        risk = %prediction.risk,
        confidence = prediction.confidence,
        "Prediction complete"
    );

    let recommendation = state.advisor.recommend(prediction.risk).await?;

    Ok(Outcome { prediction, recommendation })
}

/// POST /api/v1/predict
pub async fn predict_json(
    State(state): State<AppState>,
    body: Result<Json<StudentProfile>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(profile) = body?;
    let outcome = run_prediction(&state, profile).await?;
    Ok(Json(outcome.into()))
}
