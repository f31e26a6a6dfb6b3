//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the exported classifier and runs it on one encoded row.
//! The model is expected to expose one `f32[1, FEATURE_COUNT]` input and
//! two outputs: the class label (`i64`) and the class probabilities
//! (`f32[1, CLASS_COUNT]`), which is what the XGBoost ONNX exporters emit.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use crate::logic::features::layout::LayoutMismatchError;
use crate::logic::features::EncodedFeatureVector;
use super::risk::CLASS_COUNT;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Unexpected tensor shape: {0}")]
    Shape(String),

    #[error("Model returned unknown class index {0}")]
    UnknownClass(i64),

    #[error("Model output missing: {0}")]
    MissingOutput(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A loaded 3-class classifier.
///
/// Mirrors the two calls the trained estimator exposes: `predict` for the
/// class label and `predict_proba` for the per-class probabilities.
pub trait Classifier: Send + Sync {
    /// Human-readable model name (path for file-backed models)
    fn name(&self) -> &str;

    fn predict(&self, row: &EncodedFeatureVector) -> Result<i64, InferenceError>;

    fn predict_proba(&self, row: &EncodedFeatureVector) -> Result<[f32; CLASS_COUNT], InferenceError>;

    /// Label and probabilities for one row. Override when both come out
    /// of a single forward pass.
    fn classify(&self, row: &EncodedFeatureVector) -> Result<(i64, [f32; CLASS_COUNT]), InferenceError> {
        Ok((self.predict(row)?, self.predict_proba(row)?))
    }

    /// Load-time details, for file-backed models
    fn metadata(&self) -> Option<&ModelMetadata> {
        None
    }

    fn inference_count(&self) -> u64 {
        0
    }
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Captured once at load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub input_name: String,
    pub label_output: String,
    pub probability_output: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    session: Mutex<Session>,
    metadata: ModelMetadata,
    inference_count: AtomicU64,
}

impl OnnxClassifier {
    /// Load the model from a file. A missing file is reported as
    /// `ModelNotFound` before the runtime is touched.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let model_path = model_path.as_ref();
        let display_path = model_path.display().to_string();

        if !model_path.exists() {
            return Err(InferenceError::ModelNotFound(display_path));
        }

        log::info!("Loading ONNX model from: {}", display_path);

        let session = Session::builder()
            .map_err(|e| InferenceError::Session(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Session(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError::Session(format!("Failed to load model: {}", e)))?;

        let input_name = session.inputs.first()
            .map(|i| i.name.clone())
            .ok_or_else(|| InferenceError::Shape("model has no inputs".to_string()))?;

        if session.outputs.len() < 2 {
            return Err(InferenceError::Shape(format!(
                "expected label and probability outputs, model has {}",
                session.outputs.len()
            )));
        }
        let label_output = session.outputs[0].name.clone();
        let probability_output = session.outputs[1].name.clone();

        log::info!(
            "ONNX model loaded: input={}, outputs=[{}, {}]",
            input_name, label_output, probability_output
        );

        Ok(Self {
            session: Mutex::new(session),
            metadata: ModelMetadata {
                model_path: display_path,
                input_name,
                label_output,
                probability_output,
                loaded_at: chrono::Utc::now(),
            },
            inference_count: AtomicU64::new(0),
        })
    }

    /// One forward pass; returns (label, probabilities)
    fn run(&self, row: &EncodedFeatureVector) -> Result<(i64, [f32; CLASS_COUNT]), InferenceError> {
        let start_time = Instant::now();

        let input_tensor = Value::from_array(row.to_row())
            .map_err(|e| InferenceError::Session(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![self.metadata.input_name.as_str() => input_tensor])
            .map_err(|e| InferenceError::Session(format!("Inference failed: {}", e)))?;

        let label_value = outputs.get(self.metadata.label_output.as_str())
            .ok_or_else(|| InferenceError::MissingOutput(self.metadata.label_output.clone()))?;
        let (_, labels) = label_value.try_extract_tensor::<i64>()
            .map_err(|e| InferenceError::Shape(format!("label: {}", e)))?;
        let label = *labels.first()
            .ok_or_else(|| InferenceError::Shape("empty label output".to_string()))?;

        let proba_value = outputs.get(self.metadata.probability_output.as_str())
            .ok_or_else(|| InferenceError::MissingOutput(self.metadata.probability_output.clone()))?;
        let (_, data) = proba_value.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Shape(format!("probabilities: {}", e)))?;

        if data.len() != CLASS_COUNT {
            return Err(InferenceError::Shape(format!(
                "expected {} probabilities, got {}",
                CLASS_COUNT,
                data.len()
            )));
        }
        let mut probabilities = [0.0f32; CLASS_COUNT];
        probabilities.copy_from_slice(data);

        self.inference_count.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Inference done in {}us: label={} proba={:?}",
            start_time.elapsed().as_micros(),
            label,
            probabilities
        );

        Ok((label, probabilities))
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.metadata.model_path
    }

    fn predict(&self, row: &EncodedFeatureVector) -> Result<i64, InferenceError> {
        self.run(row).map(|(label, _)| label)
    }

    fn predict_proba(&self, row: &EncodedFeatureVector) -> Result<[f32; CLASS_COUNT], InferenceError> {
        self.run(row).map(|(_, probabilities)| probabilities)
    }

    fn classify(&self, row: &EncodedFeatureVector) -> Result<(i64, [f32; CLASS_COUNT]), InferenceError> {
        self.run(row)
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        Some(&self.metadata)
    }

    fn inference_count(&self) -> u64 {
        self.inference_count.load(Ordering::Relaxed)
    }
}
