//! Risk Result - class index → label, severity, confidence

use std::time::Instant;

use serde::{Serialize, Serializer};

use crate::logic::features::EncodedFeatureVector;
use super::inference::{Classifier, InferenceError};

/// Number of risk classes the model predicts
pub const CLASS_COUNT: usize = 3;

// ============================================================================
// RISK LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Fixed Low/Medium/High order, also the class index order
    pub const ALL: [RiskLevel; CLASS_COUNT] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn from_class_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(RiskLevel::Low),
            1 => Some(RiskLevel::Medium),
            2 => Some(RiskLevel::High),
            _ => None,
        }
    }

    pub fn class_index(self) -> usize {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RiskLevel::Low => Severity::Info,
            RiskLevel::Medium => Severity::Warning,
            RiskLevel::High => Severity::Error,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Alert style for the rendered result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "✅",
            Severity::Warning => "⚠️",
            Severity::Error => "🚨",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "alert-info",
            Severity::Warning => "alert-warning",
            Severity::Error => "alert-error",
        }
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub class_index: usize,
    pub risk: RiskLevel,
    pub severity: Severity,
    /// Per-class probabilities in Low/Medium/High order
    pub probabilities: [f32; CLASS_COUNT],
    /// max(probabilities) × 100
    pub confidence: f32,
    pub inference_time_us: u64,
}

impl PredictionResult {
    pub fn new(class_index: i64, probabilities: [f32; CLASS_COUNT]) -> Result<Self, InferenceError> {
        let risk = RiskLevel::from_class_index(class_index)
            .ok_or(InferenceError::UnknownClass(class_index))?;

        let max_probability = probabilities.iter().copied().fold(0.0f32, f32::max);

        Ok(Self {
            class_index: risk.class_index(),
            risk,
            severity: risk.severity(),
            probabilities,
            confidence: max_probability * 100.0,
            inference_time_us: 0,
        })
    }

    /// Confidence rounded to one decimal
    pub fn confidence_rounded(&self) -> f32 {
        (self.confidence * 10.0).round() / 10.0
    }

    /// Alert text, e.g. `⚠️ Medium Risk (61.3%)`
    pub fn headline(&self) -> String {
        format!("{} {} ({:.1}%)", self.severity.icon(), self.risk, self.confidence)
    }

    /// (label, probability) pairs in fixed chart order
    pub fn chart_bars(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        RiskLevel::ALL.iter().map(|r| r.label()).zip(self.probabilities.iter().copied())
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Classify one row and assemble the result.
///
/// Rows built against another feature layout are rejected before the model runs.
pub fn predict(
    classifier: &dyn Classifier,
    row: &EncodedFeatureVector,
) -> Result<PredictionResult, InferenceError> {
    let start_time = Instant::now();

    row.validate()?;
    let (class_index, probabilities) = classifier.classify(row)?;

    let sum: f32 = probabilities.iter().sum();
    if (sum - 1.0).abs() > 1e-4 {
        log::warn!("Probabilities from {} sum to {}", classifier.name(), sum);
    }

    let mut result = PredictionResult::new(class_index, probabilities)?;
    result.inference_time_us = start_time.elapsed().as_micros() as u64;

    Ok(result)
}
