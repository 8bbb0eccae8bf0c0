//! Chat-completion HTTP client.
//!
//! Speaks the OpenAI-compatible `chat/completions` protocol (DashScope
//! compatible mode by default) and returns `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::core::interpretation::CompletionSettings;
use crate::domain::ports::{ChatRequest, CompletionBackend};
use crate::utils::error::{QimenError, Result};

pub const DEFAULT_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";

/// Resolved settings for the completion client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: SecretString,
    /// None leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    pub completion: CompletionSettings,
}

impl LlmConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            timeout: None,
            completion: CompletionSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct ChatCompletionClient {
    client: Client,
    endpoint: String,
    api_key: SecretString,
}

impl ChatCompletionClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        tracing::debug!("Making completion request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Completion response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(QimenError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| QimenError::MalformedResponse {
                message: format!("unexpected response body: {}", e),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| QimenError::MalformedResponse {
                message: "response contains no choices".to_string(),
            })
    }
}

/// Backend that always fails, so every interpretation uses the local text.
/// Used for `--offline` and when no credential is configured.
#[derive(Debug, Clone)]
pub struct DisabledBackend {
    reason: String,
}

impl DisabledBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CompletionBackend for DisabledBackend {
    async fn complete(&self, _request: &ChatRequest) -> Result<String> {
        Err(QimenError::BackendUnavailable {
            reason: self.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"你好"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "你好");

        assert!(serde_json::from_str::<ChatResponse>(r#"{"output":"x"}"#).is_err());
    }

    #[test]
    fn test_client_builds_with_timeout() {
        let mut config = LlmConfig::new(SecretString::from("sk-test"));
        config.timeout = Some(Duration::from_secs(5));

        let client = ChatCompletionClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_disabled_backend_always_fails() {
        let backend = DisabledBackend::new("offline mode");
        let request = ChatRequest {
            model: "qwen-plus".to_string(),
            messages: vec![],
            max_tokens: 10,
            temperature: 0.7,
            top_p: 0.9,
        };

        let err = backend.complete(&request).await.unwrap_err();
        assert!(matches!(err, QimenError::BackendUnavailable { .. }));
    }
}
