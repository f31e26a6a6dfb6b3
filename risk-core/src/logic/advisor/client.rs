//! Generation API Client
//!
//! One POST per prompt. No retry, no timeout, no caching: a slow or
//! failing upstream is surfaced to the caller as-is.

use thiserror::Error;

use super::types::{GenerateContentRequest, GenerateContentResponse};

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Generation API returned no text")]
    EmptyResponse,
}

/// Client for the `generateContent` endpoint
pub struct GeminiClient {
    api_key: String,
    model: String,
    api_base: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, api_base: String) -> Result<Self, AdvisorError> {
        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Send one prompt, return the generated text
    pub async fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
        log::debug!("Requesting generation from {}", self.model);

        let response = self.http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Status { status: status.as_u16(), body });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text().ok_or(AdvisorError::EmptyResponse)
    }
}
