//! Model Module - Classifier inference
//!
//! `inference` owns the loaded model, `risk` turns its output into a
//! labelled result.

pub mod inference;
pub mod risk;

// Re-export common types
pub use inference::{Classifier, InferenceError, ModelMetadata, OnnxClassifier};
pub use risk::{predict, PredictionResult, RiskLevel, Severity, CLASS_COUNT};
