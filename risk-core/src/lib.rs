//! Student Dropout Risk - Core
//!
//! Everything between the form and the page:
//!
//! ```text
//! StudentProfile ──encode──▶ EncodedFeatureVector ──Classifier──▶ PredictionResult
//!                                                                      │
//!                                                          Advisor ◀───┘ (optional)
//! ```
//!
//! The HTTP surface lives in the `dropout-server` crate.

pub mod constants;
pub mod logic;

pub use logic::features::{
    encode_profile, EncodedFeatureVector, Gender, LayoutInfo, ParentalEducation, Region,
    StudentProfile, YesNo, FEATURE_COUNT, FEATURE_LAYOUT,
};
pub use logic::model::{
    predict, Classifier, InferenceError, ModelMetadata, OnnxClassifier, PredictionResult,
    RiskLevel, Severity, CLASS_COUNT,
};
pub use logic::advisor::{Advisor, AdvisorConfig, AdvisorError, Recommendation};
