//! LLM backends

use crate::config::GeneratorConfig;
use crate::errors::{GeneratorError, Result};
use crate::types::GenerationSettings;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// A text-in, text-out model
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, for logging
    fn name(&self) -> &str;

    /// Run one completion and return the reply text
    async fn complete(&self, prompt: &str, settings: GenerationSettings) -> Result<String>;
}

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    /// Create a client from the generator configuration
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn request_body(prompt: &str, settings: GenerationSettings) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": {
                "maxOutputTokens": settings.max_tokens,
                "temperature": settings.temperature,
            },
        })
    }

    /// Concatenated text of the first candidate
    fn parse_response(response: &Value) -> Result<String> {
        let candidate = response["candidates"].get(0).ok_or_else(|| {
            let feedback = &response["promptFeedback"];
            GeneratorError::Model(format!("No candidates in response: {}", feedback))
        })?;

        let text: String = candidate["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate["finishReason"].as_str().unwrap_or("UNKNOWN");
            return Err(GeneratorError::Model(format!(
                "Response contained no text (finish reason: {})",
                reason
            )));
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait::async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, settings: GenerationSettings) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GeneratorError::Config("Gemini API key not configured".to_string()))?;

        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(prompt, settings))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Model(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await?;
        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = GeminiClient::request_body(
            "hi",
            GenerationSettings {
                max_tokens: 2000,
                temperature: 0.5,
            },
        );
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2000);
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": {"parts": [{"text": " {\"quizzes\": "}, {"text": "[]} "}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(
            GeminiClient::parse_response(&response).unwrap(),
            "{\"quizzes\": []}"
        );
    }

    #[test]
    fn test_parse_response_without_text() {
        let blocked = json!({"candidates": [{"finishReason": "SAFETY"}]});
        let err = GeminiClient::parse_response(&blocked).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));

        let empty = json!({"promptFeedback": {"blockReason": "OTHER"}});
        assert!(matches!(
            GeminiClient::parse_response(&empty).unwrap_err(),
            GeneratorError::Model(_)
        ));
    }

    #[test]
    fn test_endpoint() {
        let config = GeneratorConfig::new()
            .with_api_base("http://localhost:9000/v1beta/")
            .with_model("gemini-pro");
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-pro:generateContent"
        );
    }
}
