//! Gemini API client

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::types::*;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";

/// Gemini API client
///
/// One request/response exchange per call: format a prompt, send it, return
/// the model's text. Cheap to clone; every clone shares the underlying HTTP
/// connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    generation_config: GenerationConfig,
    max_retries: u32,
    system_prompt: Option<String>,
}

impl GeminiClient {
    /// Create a new client with the given API key and model
    pub fn new(
        api_key: String,
        model: String,
        generation_config: GenerationConfig,
        timeout_secs: u64,
        max_retries: u32,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            api_key,
            model,
            generation_config,
            max_retries,
            system_prompt: None,
        })
    }

    /// Set the system instruction sent with every request
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build headers for API requests
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key).context("Invalid API key")?,
        );

        Ok(headers)
    }

    /// Send a prompt and return the model's text response
    ///
    /// Transport failures and 429/5xx statuses are retried up to
    /// `max_retries` times with a short backoff; anything else fails
    /// immediately.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            system_instruction: self.system_prompt.as_deref().map(Content::system),
            contents: vec![Content::user(prompt)],
            generation_config: self.generation_config.clone(),
        };

        let mut attempt = 0;
        loop {
            match self.send(&request).await {
                Ok(response) => {
                    if let Some(usage) = response.usage_metadata {
                        debug!(
                            "Generation complete: {} prompt + {} output tokens",
                            usage.prompt_token_count, usage.candidates_token_count
                        );
                    }
                    return response
                        .text()
                        .context("Model returned a response with no text");
                }
                Err(err) if attempt < self.max_retries && err.is_retryable() => {
                    attempt += 1;
                    warn!("Request failed (attempt {}): {}", attempt, err);
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Execute a single generateContent request
    async fn send(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse, RequestError> {
        let url = format!(
            "{}/{}/models/{}:generateContent",
            API_BASE_URL, API_VERSION, self.model
        );

        let response = self
            .http_client
            .post(&url)
            .headers(self.headers().map_err(RequestError::Other)?)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            let message = match serde_json::from_str::<ApiErrorResponse>(&error_text) {
                Ok(envelope) => envelope.error.message,
                Err(_) => error_text,
            };
            return Err(RequestError::Api { status, message });
        }

        response.json().await.map_err(RequestError::Transport)
    }
}

/// Failure modes of a single API exchange
#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Other(anyhow::Error),
}

impl RequestError {
    /// Whether a retry could plausibly succeed
    fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::Transport(_) => true,
            Self::Other(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(
            "test-key".to_string(),
            "gemini-1.5-pro".to_string(),
            GenerationConfig::default(),
            30,
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_client_construction() {
        let client = client().with_system_prompt("You are a travel assistant.");
        assert_eq!(client.model(), "gemini-1.5-pro");
        assert_eq!(
            client.system_prompt.as_deref(),
            Some("You are a travel assistant.")
        );
    }

    #[test]
    fn test_retryable_classification() {
        let rate_limited = RequestError::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "slow down".to_string(),
        };
        assert!(rate_limited.is_retryable());

        let server_error = RequestError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        };
        assert!(server_error.is_retryable());

        let bad_request = RequestError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "invalid".to_string(),
        };
        assert!(!bad_request.is_retryable());
    }
}
