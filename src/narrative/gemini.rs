use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::narrative::TextGenerator;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

impl GenerateContentRequest {
    pub fn user_text(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(self) -> Result<String> {
        let candidate = self
            .candidates
            .ok_or_else(|| AppError::Gemini("No candidates returned".to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Gemini("Empty candidates list".to_string()))?;
        let content = candidate
            .content
            .ok_or_else(|| AppError::Gemini("Candidate has no content".to_string()))?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            return Err(AppError::Gemini("Model returned no text".to_string()));
        }
        Ok(text)
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Build a client from settings. A missing key is not rejected here; the
    /// service refuses the request and the caller sees the usual failure.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.api_key().unwrap_or_default(),
            settings.model.clone(),
            settings.base_url.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Transport errors print their request URL; keep it out of logs.
fn http_error(e: reqwest::Error) -> AppError {
    AppError::Http(e.without_url())
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = GenerateContentRequest::user_text(prompt);
        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(http_error)?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await.map_err(http_error)?;
            return Err(AppError::Gemini(format!(
                "status {}: {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await.map_err(http_error)?;
        body.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let payload = GenerateContentRequest::user_text("hello");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }]
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    { "content": { "role": "model", "parts": [{ "text": "**Executive" }, { "text": " Summary**" }] } },
                    { "content": { "parts": [{ "text": "ignored" }] } }
                ],
                "usageMetadata": { "totalTokenCount": 12 }
            }"#,
        )
        .unwrap();
        assert_eq!(body.text().unwrap(), "**Executive Summary**");
    }

    #[test]
    fn test_response_without_candidates_is_error() {
        let body: GenerateContentResponse =
            serde_json::from_str(r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#).unwrap();
        assert!(matches!(body.text(), Err(AppError::Gemini(_))));

        let body: GenerateContentResponse = serde_json::from_str(r#"{ "candidates": [] }"#).unwrap();
        assert!(matches!(body.text(), Err(AppError::Gemini(_))));
    }

    #[test]
    fn test_endpoint_uses_settings() {
        let mut settings = Settings::default();
        settings.base_url = "http://localhost:9999/v1beta".to_string();
        settings.api_key_env = "FINANALYZER_TEST_UNSET_KEY".to_string();
        let client = GeminiClient::from_settings(&settings);
        assert_eq!(client.model(), "gemini-2.5-flash");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = GeminiClient::new(
            String::new(),
            "gemini-2.5-flash".to_string(),
            "http://127.0.0.1:9/v1beta".to_string(),
        );
        assert!(client.generate("hi").await.is_err());
    }

    #[tokio::test]
    async fn test_transport_error_does_not_reveal_key() {
        let client = GeminiClient::new(
            "SECRET-KEY-123".to_string(),
            "gemini-2.5-flash".to_string(),
            "http://127.0.0.1:9/v1beta".to_string(),
        );
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        let message = err.to_string();
        assert!(!message.contains("SECRET-KEY-123"));
        assert!(!message.contains("127.0.0.1"));
    }
}
