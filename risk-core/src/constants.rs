//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! The server reads its environment through these helpers.

/// Default model artifact path (relative to the working directory)
pub const DEFAULT_MODEL_PATH: &str = "xgboost_model.onnx";

/// Default generation model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default generation API base URL
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Student Dropout Risk Prediction System";

/// Shown in place of recommendations when no API key is configured
pub const RECOMMENDATIONS_DISABLED_MESSAGE: &str =
    "Gemini API key not found. AI recommendations disabled.";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get the generation API key. Empty values count as absent.
pub fn get_gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Get generation model name from environment or use default
pub fn get_gemini_model() -> String {
    std::env::var("GEMINI_MODEL")
        .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string())
}

/// Get generation API base URL from environment or use default
pub fn get_gemini_api_base() -> String {
    std::env::var("GEMINI_API_BASE")
        .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string())
}
