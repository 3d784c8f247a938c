//! Perplexity API backend
//!
//! OpenAI-compatible chat completions with a bearer key.

use super::http_client::build_provider_client;
use super::provider::CompletionBackend;
use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";

pub const DEFAULT_PERPLEXITY_MODEL: &str = "llama-3.1-sonar-small-128k-online";

pub struct PerplexityBackend {
    client: Client,
    api_key: String,
    model: String,
}

impl PerplexityBackend {
    pub fn new(api_key: Option<String>, model: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = api_key.ok_or(ProviderError::MissingCredentials("Perplexity"))?;
        Ok(Self {
            client: build_provider_client(timeout)?,
            api_key,
            model: model.to_string(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl CompletionBackend for PerplexityBackend {
    fn name(&self) -> &str {
        "perplexity"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(PERPLEXITY_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_fails_at_construction() {
        let result = PerplexityBackend::new(None, DEFAULT_PERPLEXITY_MODEL, Duration::from_secs(5));
        assert!(matches!(result, Err(ProviderError::MissingCredentials("Perplexity"))));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["model"], "m");
    }
}
