//! Configuration module

use std::env;

use dropout_core::constants;
use dropout_core::AdvisorConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the ONNX model artifact
    pub model_path: String,

    /// Generation API settings; no key means recommendations are disabled
    pub advisor: AdvisorConfig,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: constants::get_model_path(),

            advisor: AdvisorConfig::from_env(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn recommendations_enabled(&self) -> bool {
        self.advisor.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            model_path: constants::DEFAULT_MODEL_PATH.to_string(),
            advisor: AdvisorConfig::default(),
            environment: "development".to_string(),
        }
    }
}
