//! Student Dropout Risk - Web Server
//!
//! Serves the prediction form and a JSON API over the same pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   DROPOUT RISK SERVER                      │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │  │  Form /   │──▶│   Encoder    │──▶│ ONNX Classifier  │   │
//! │  │  JSON API │   │ (17 columns) │   │ (loaded once)    │   │
//! │  │  (Axum)   │   └──────────────┘   └────────┬─────────┘   │
//! │  └─────┬─────┘                               │             │
//! │        │          ┌──────────────────┐       │             │
//! │        └─────────▶│ Advisor (Gemini) │◀──────┘             │
//! │                   │ optional         │                     │
//! │                   └──────────────────┘                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod views;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use dropout_core::{Advisor, AdvisorError, Classifier, InferenceError, OnnxClassifier};
use thiserror::Error;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config);

    tracing::info!("{} v{} starting...", dropout_core::constants::APP_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Model: {}", config.model_path);
    if !config.recommendations_enabled() {
        tracing::warn!("{}", dropout_core::constants::RECOMMENDATIONS_DISABLED_MESSAGE);
    }

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("❌ {} - prediction is unavailable, shutting down", e);
            std::process::exit(1);
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dropout_server=debug,dropout_core=info,tower_http=debug".into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub advisor: Arc<Advisor>,
}

/// Failures that stop the server before it accepts requests
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0} not found in project folder")]
    ModelMissing(String),

    #[error("Failed to load model: {0}")]
    Model(InferenceError),

    #[error("Failed to initialize AI recommendations: {0}")]
    Advisor(#[from] AdvisorError),
}

impl From<InferenceError> for StartupError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ModelNotFound(path) => StartupError::ModelMissing(path),
            other => StartupError::Model(other),
        }
    }
}

/// Load the model and set up the advisor; runs once per process
pub fn build_state(config: &config::Config) -> Result<AppState, StartupError> {
    let classifier = OnnxClassifier::load(&config.model_path)?;
    let advisor = Advisor::from_config(config.advisor.clone())?;

    Ok(AppState {
        classifier: Arc::new(classifier),
        advisor: Arc::new(advisor),
    })
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        // Form UI
        .route("/", get(handlers::form::index))
        .route("/predict", post(handlers::form::submit))

        // JSON API
        .route("/api/v1/predict", post(handlers::predict::predict_json))
        .route("/api/v1/schema", get(handlers::schema::layout))

        .route("/health", get(handlers::health::check))

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
