//! Chat model seam and its OpenAI-compatible implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;
use vitrine_http::{parse_base_url, HttpClient, HttpConfig};

use crate::error::{AssistantError, Result};
use crate::models::{ChatRequest, Message};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Anything that can turn a chat request into completion text
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

/// OpenAI chat completions (or any server speaking the same API)
pub struct OpenAiChatModel {
    api_key: String,
    endpoint: Url,
    http: HttpClient,
}

impl OpenAiChatModel {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        Self::with_config(api_key, base_url, HttpConfig::llm())
    }

    pub fn with_config(
        api_key: impl Into<String>,
        base_url: &str,
        config: HttpConfig,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(AssistantError::ConfigError(
                "OpenAI API key is required".to_string(),
            ));
        }

        let endpoint = parse_base_url(base_url)?
            .join("chat/completions")
            .map_err(|e| AssistantError::ConfigError(e.to_string()))?;

        Ok(Self {
            api_key,
            endpoint,
            http: HttpClient::new(config)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let body = OpenAiChatRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            presence_penalty: request.presence_penalty,
            frequency_penalty: request.frequency_penalty,
        };

        debug!("Sending chat request for model: {}", request.model);

        let response: OpenAiChatResponse = self
            .http
            .post_json(&self.endpoint, &body, Some(&self.api_key))
            .await
            .map_err(|e| {
                error!("Chat completion failed: {}", e);
                AssistantError::from(e)
            })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| AssistantError::ModelError("No content in response".to_string()))
    }
}

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiMessage>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_model_creation() {
        let model = OpenAiChatModel::new("sk-test").unwrap();
        assert_eq!(
            model.endpoint().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            OpenAiChatModel::new(""),
            Err(AssistantError::ConfigError(_))
        ));
    }

    #[test]
    fn test_request_omits_unset_options() {
        let messages = vec![Message::system("hi")];
        let body = OpenAiChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            temperature: Some(0.5),
            max_tokens: None,
            top_p: None,
            presence_penalty: None,
            frequency_penalty: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["temperature"], 0.5);
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("presence_penalty").is_none());
    }
}
