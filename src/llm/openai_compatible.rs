// ABOUTME: OpenAI-compatible chat completions provider
// ABOUTME: Works with the OpenAI API or any endpoint speaking the same protocol
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OpenAI-Compatible Provider
//!
//! Posts to `{base_url}/chat/completions` with bearer authentication.
//! Optional request fields are emitted only when the provider's resolved
//! [`LlmCapabilities`] allow them.

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::external::transport_error;
use async_trait::async_trait;
use mealwise_core::constants::defaults;
use mealwise_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const SERVICE: &str = "OpenAI";

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Model name prefixes that accept `reasoning_effort` and reject `temperature`
const REASONING_MODEL_PREFIXES: &[&str] = &["o1", "o3", "o4", "gpt-5"];

/// Model name prefixes that accept `response_format: json_object`
const JSON_MODE_MODEL_PREFIXES: &[&str] = &["gpt-3.5-turbo", "gpt-4", "gpt-5", "o1", "o3", "o4"];

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://api.openai.com/v1>)
    pub base_url: String,
    /// API key
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Resolve capabilities for a model identifier
    #[must_use]
    pub fn capabilities_for_model(model: &str) -> LlmCapabilities {
        let model = model.to_lowercase();
        let has_prefix = |prefixes: &[&str]| prefixes.iter().any(|p| model.starts_with(p));

        let mut capabilities = LlmCapabilities::SYSTEM_MESSAGES;
        if has_prefix(REASONING_MODEL_PREFIXES) {
            capabilities |= LlmCapabilities::REASONING_EFFORT;
        } else {
            capabilities |= LlmCapabilities::TEMPERATURE;
        }
        if has_prefix(JSON_MODE_MODEL_PREFIXES) {
            capabilities |= LlmCapabilities::JSON_MODE;
        }
        capabilities
    }
}

impl From<&LlmConfig> for OpenAiCompatibleConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| defaults::OPENAI_BASE_URL.to_owned()),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            capabilities: Self::capabilities_for_model(&config.model),
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    /// Translate a chat request into the wire format, dropping unsupported hints
    fn build_request(&self, request: &ChatRequest) -> OpenAiRequest {
        let capabilities = self.config.capabilities;
        OpenAiRequest {
            model: self.config.default_model.clone(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request
                .temperature
                .filter(|_| capabilities.supports_temperature()),
            reasoning_effort: request
                .reasoning_effort
                .filter(|_| capabilities.supports_reasoning_effort())
                .map(|effort| effort.as_str()),
            response_format: (request.json_output && capabilities.supports_json_mode())
                .then_some(ResponseFormat {
                    format_type: "json_object",
                }),
        }
    }

    /// Parse error response from API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| {
                format!(
                    "{} - {}",
                    parsed.error.error_type.unwrap_or_else(|| "unknown".to_owned()),
                    parsed.error.message
                )
            },
        );

        match status.as_u16() {
            401 | 403 => AppError::config_missing(format!("API authentication failed: {detail}")),
            429 | 500..=599 => {
                AppError::external_unavailable(SERVICE, format!("HTTP {status}: {detail}"))
            }
            _ => AppError::external_service(SERVICE, format!("HTTP {status}: {detail}")),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %self.config.default_model))]
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let openai_request = self.build_request(request);
        debug!(
            messages = openai_request.messages.len(),
            reasoning_effort = ?openai_request.reasoning_effort,
            "Sending chat completion request"
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to {SERVICE}: {e}");
                transport_error(SERVICE, &e, self.config.timeout_secs)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {e}");
            transport_error(SERVICE, &e, self.config.timeout_secs)
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {e}");
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE, "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();
        debug!(
            "Received response: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model,
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReasoningEffort;
    use mealwise_core::errors::ErrorCode;

    fn provider(model: &str) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
            base_url: "http://localhost:1/v1/".to_owned(),
            api_key: Some("sk-test".to_owned()),
            default_model: model.to_owned(),
            timeout_secs: 5,
            capabilities: OpenAiCompatibleConfig::capabilities_for_model(model),
        })
        .unwrap()
    }

    fn hinted_request() -> ChatRequest {
        ChatRequest::new(vec![ChatMessage::user("plan")])
            .with_temperature(0.7)
            .with_reasoning_effort(Some(ReasoningEffort::Medium))
            .with_json_output()
    }

    #[test]
    fn test_capabilities_by_model() {
        let reasoning = OpenAiCompatibleConfig::capabilities_for_model("o3-mini");
        assert!(reasoning.supports_reasoning_effort());
        assert!(!reasoning.supports_temperature());

        let chat = OpenAiCompatibleConfig::capabilities_for_model("gpt-4o-mini");
        assert!(!chat.supports_reasoning_effort());
        assert!(chat.supports_json_mode());

        let local = OpenAiCompatibleConfig::capabilities_for_model("llama3.1:8b");
        assert!(!local.supports_json_mode());
    }

    #[test]
    fn test_reasoning_hint_dropped_for_unsupported_model() {
        let value = serde_json::to_value(provider("gpt-4o-mini").build_request(&hinted_request()))
            .unwrap();
        assert!(value.get("reasoning_effort").is_none());
        assert!(value.get("temperature").is_some());
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_reasoning_hint_sent_for_reasoning_model() {
        let value = serde_json::to_value(provider("o3-mini").build_request(&hinted_request()))
            .unwrap();
        assert_eq!(value["reasoning_effort"], "medium");
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_api_url_trims_slash() {
        assert_eq!(
            provider("gpt-4o").api_url("chat/completions"),
            "http://localhost:1/v1/chat/completions"
        );
    }

    #[test]
    fn test_error_status_mapping() {
        let body = r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error"}}"#;
        let auth = OpenAiCompatibleProvider::parse_error_response(
            reqwest::StatusCode::UNAUTHORIZED,
            body,
        );
        assert_eq!(auth.code, ErrorCode::ConfigMissing);

        let busy = OpenAiCompatibleProvider::parse_error_response(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "slow down",
        );
        assert!(busy.is_transport_failure());
    }
}
