//! Advisor Module - LLM intervention recommendations
//!
//! Two states, fixed at startup:
//! - `Disabled`: no API key. Never builds an HTTP client, never calls out.
//! - `Enabled`: one generation call per prediction.

pub mod client;
pub mod types;

pub use client::{AdvisorError, GeminiClient};

use serde::Serialize;

use crate::constants;
use crate::logic::model::RiskLevel;

// ============================================================================
// PROMPTS
// ============================================================================

/// Guidance request appended to the prompt for each risk level
pub fn guidance(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "Provide growth-focused academic and career guidance.",
        RiskLevel::Medium => "Provide targeted academic and emotional intervention.",
        RiskLevel::High => "Provide emergency academic, financial, and psychological support.",
    }
}

pub fn build_prompt(risk: RiskLevel) -> String {
    format!("Student is at {}. {}", risk.label(), guidance(risk))
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// `None` disables recommendations
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl AdvisorConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: constants::get_gemini_api_key(),
            model: constants::get_gemini_model(),
            api_base: constants::get_gemini_api_base(),
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: constants::DEFAULT_GEMINI_MODEL.to_string(),
            api_base: constants::DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }
}

// ============================================================================
// ADVISOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum Recommendation {
    Disabled,
    Generated(String),
}

impl Recommendation {
    pub fn text(&self) -> Option<&str> {
        match self {
            Recommendation::Generated(text) => Some(text),
            Recommendation::Disabled => None,
        }
    }
}

pub enum Advisor {
    Disabled,
    Enabled(GeminiClient),
}

impl Advisor {
    pub fn from_config(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        match config.api_key {
            Some(key) => {
                log::info!("AI recommendations enabled ({})", config.model);
                Ok(Advisor::Enabled(GeminiClient::new(key, config.model, config.api_base)?))
            }
            None => {
                log::info!("{}", constants::RECOMMENDATIONS_DISABLED_MESSAGE);
                Ok(Advisor::Disabled)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Advisor::Enabled(_))
    }

    /// One generation call when enabled; nothing when disabled
    pub async fn recommend(&self, risk: RiskLevel) -> Result<Recommendation, AdvisorError> {
        match self {
            Advisor::Disabled => Ok(Recommendation::Disabled),
            Advisor::Enabled(client) => {
                let text = client.generate(&build_prompt(risk)).await?;
                Ok(Recommendation::Generated(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::{HeaderMap, StatusCode, Uri}, Json, Router};
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    #[derive(Clone)]
    struct FakeApi {
        hits: Arc<AtomicUsize>,
        last: Arc<Mutex<Option<(String, String, Value)>>>,
        status: StatusCode,
        reply: Value,
    }

    async fn handle(
        State(api): State<FakeApi>,
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        api.hits.fetch_add(1, Ordering::SeqCst);
        let key = headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        *api.last.lock() = Some((uri.path().to_string(), key, body));
        (api.status, Json(api.reply.clone()))
    }

    /// Local stand-in for the generation API; returns its base URL
    async fn spawn_fake_api(status: StatusCode, reply: Value) -> (String, FakeApi) {
        let api = FakeApi {
            hits: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
            status,
            reply,
        };
        let app = Router::new().fallback(handle).with_state(api.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/v1beta", addr), api)
    }

    fn reply_with(text: &str) -> Value {
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
    }

    #[test]
    fn test_prompts_per_level() {
        assert_eq!(
            build_prompt(RiskLevel::Low),
            "Student is at Low Risk. Provide growth-focused academic and career guidance."
        );
        assert_eq!(
            build_prompt(RiskLevel::Medium),
            "Student is at Medium Risk. Provide targeted academic and emotional intervention."
        );
        assert_eq!(
            build_prompt(RiskLevel::High),
            "Student is at High Risk. Provide emergency academic, financial, and psychological support."
        );
    }

    #[tokio::test]
    async fn test_disabled_never_calls_out() {
        let (base, api) = spawn_fake_api(StatusCode::OK, reply_with("unused")).await;
        let advisor = Advisor::from_config(AdvisorConfig {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            api_base: base,
        })
        .unwrap();

        assert!(!advisor.is_enabled());
        for level in RiskLevel::ALL {
            assert_eq!(advisor.recommend(level).await.unwrap(), Recommendation::Disabled);
        }
        assert_eq!(api.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_enabled_sends_one_request() {
        let (base, api) = spawn_fake_api(StatusCode::OK, reply_with("Meet weekly with a mentor.")).await;
        let advisor = Advisor::from_config(AdvisorConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-2.0-flash".to_string(),
            api_base: base,
        })
        .unwrap();

        let rec = advisor.recommend(RiskLevel::High).await.unwrap();
        assert_eq!(rec.text(), Some("Meet weekly with a mentor."));
        assert_eq!(api.hits.load(Ordering::SeqCst), 1);

        let (path, key, body) = api.last.lock().clone().unwrap();
        assert_eq!(path, "/v1beta/models/gemini-2.0-flash:generateContent");
        assert_eq!(key, "test-key");
        assert_eq!(body["contents"][0]["parts"][0]["text"], build_prompt(RiskLevel::High));
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let (base, api) = spawn_fake_api(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"message": "quota"}}),
        )
        .await;
        let advisor = Advisor::from_config(AdvisorConfig {
            api_key: Some("k".to_string()),
            model: "gemini-2.0-flash".to_string(),
            api_base: base,
        })
        .unwrap();

        match advisor.recommend(RiskLevel::Low).await {
            Err(AdvisorError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("quota"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
        // no retry
        assert_eq!(api.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let (base, _api) = spawn_fake_api(StatusCode::OK, json!({"candidates": []})).await;
        let advisor = Advisor::from_config(AdvisorConfig {
            api_key: Some("k".to_string()),
            model: "gemini-2.0-flash".to_string(),
            api_base: base,
        })
        .unwrap();

        assert!(matches!(
            advisor.recommend(RiskLevel::Medium).await,
            Err(AdvisorError::EmptyResponse)
        ));
    }
}
