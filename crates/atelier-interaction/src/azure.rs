//! AzureOpenAiAgent - Direct REST API implementation for Azure OpenAI.
//!
//! This agent calls the Azure OpenAI Chat Completions API directly.
//! Connection settings come from `AtelierConfig` (config file or
//! `AZURE_OPENAI_*` environment variables).

use crate::agent::{AgentError, GenerativeAgent};
use async_trait::async_trait;
use atelier_core::config::{AtelierConfig, AzureOpenAiConfig};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Agent implementation that talks to the Azure OpenAI HTTP API.
#[derive(Clone)]
pub struct AzureOpenAiAgent {
    client: Client,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl AzureOpenAiAgent {
    /// Creates a new agent from Azure connection settings.
    pub fn new(config: &AzureOpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            api_key: config.api_key.clone(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    /// Loads settings via `AtelierConfig` (config file, then environment).
    pub fn try_from_env() -> Result<Self, AgentError> {
        let config = AtelierConfig::load()
            .map_err(|err| AgentError::ExecutionFailed(err.to_string()))?;
        Ok(Self::new(&config.azure))
    }

    /// Overrides the sampling temperature after construction.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, AgentError> {
        tracing::debug!(
            deployment = %self.deployment,
            temperature = self.temperature,
            "sending Azure OpenAI chat completion request"
        );
        let response = self
            .client
            .post(self.request_url())
            .header("api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::ProcessError {
                status_code: None,
                message: format!("Azure OpenAI request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Azure OpenAI error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            AgentError::InvalidResponse(format!("Failed to parse Azure OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerativeAgent for AzureOpenAiAgent {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AgentError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user.to_string(),
            },
        ];

        let request = ChatCompletionRequest {
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[allow(dead_code)]
    code: Option<String>,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, AgentError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            AgentError::InvalidResponse(
                "Azure OpenAI returned no content in the response".to_string(),
            )
        })
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AgentError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());
    tracing::warn!(
        status = status.as_u16(),
        "Azure OpenAI request failed: {message}"
    );

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AgentError::ProcessError {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}
