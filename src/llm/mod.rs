// ABOUTME: LLM provider abstraction layer for pluggable language model integration
// ABOUTME: Defines the provider contract, capability flags, and chat request/response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! The generation pipelines reach a language model only through
//! [`LlmProvider`]. Optional request features are described by
//! [`LlmCapabilities`]; a provider resolves its capabilities once when it is
//! built and silently drops request hints it cannot honor, so call sites never
//! branch on model names.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mealwise_server::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a nutrition assistant."),
//!         ChatMessage::user("Suggest a high-protein breakfast."),
//!     ]);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod openai_compatible;
pub mod prompts;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use crate::config::{LlmConfig, ReasoningEffort};
use async_trait::async_trait;
use mealwise_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider accepts system messages
        const SYSTEM_MESSAGES = 0b0000_0001;
        /// Provider can be asked for a JSON object response
        const JSON_MODE = 0b0000_0010;
        /// Provider accepts a reasoning-effort hint
        const REASONING_EFFORT = 0b0000_0100;
        /// Provider accepts a sampling temperature
        const TEMPERATURE = 0b0000_1000;
    }
}

impl LlmCapabilities {
    /// Check if JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }

    /// Check if a reasoning-effort hint is honored
    #[must_use]
    pub const fn supports_reasoning_effort(&self) -> bool {
        self.contains(Self::REASONING_EFFORT)
    }

    /// Check if temperature is honored
    #[must_use]
    pub const fn supports_temperature(&self) -> bool {
        self.contains(Self::TEMPERATURE)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Reasoning-effort hint, ignored by providers without the capability
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Ask for a JSON object response when the provider supports it
    pub json_output: bool,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            reasoning_effort: None,
            json_output: false,
        }
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Attach an optional reasoning-effort hint
    #[must_use]
    pub const fn with_reasoning_effort(mut self, effort: Option<ReasoningEffort>) -> Self {
        self.reasoning_effort = effort;
        self
    }

    /// Request JSON object output
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "openai")
    fn name(&self) -> &'static str;

    /// Provider capabilities, fixed at construction
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse>;
}

/// Run one completion bounded by `timeout`; exceeding it is an `ExternalTimeout`
///
/// # Errors
///
/// Returns the provider's error, or a timeout error
pub async fn complete_within(
    provider: &dyn LlmProvider,
    request: &ChatRequest,
    timeout: Duration,
) -> AppResult<ChatResponse> {
    tokio::time::timeout(timeout, provider.complete(request))
        .await
        .map_err(|_| AppError::external_timeout(provider.name(), timeout.as_secs()))?
}

/// Build the language-model provider, `None` when no API key is configured
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed
pub fn build_llm_provider(config: &LlmConfig) -> AppResult<Option<Arc<dyn LlmProvider>>> {
    if !config.is_configured() {
        return Ok(None);
    }
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from(config))?;
    Ok(Some(Arc::new(provider)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwise_core::errors::ErrorCode;

    struct SlowProvider {
        delay: Duration,
    }

    #[async_trait]
    impl LlmProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn capabilities(&self) -> LlmCapabilities {
            LlmCapabilities::SYSTEM_MESSAGES
        }

        fn default_model(&self) -> &str {
            "slow-model"
        }

        async fn complete(&self, _request: &ChatRequest) -> AppResult<ChatResponse> {
            tokio::time::sleep(self.delay).await;
            Ok(ChatResponse {
                content: "late".to_owned(),
                model: "slow-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            })
        }
    }

    #[tokio::test]
    async fn test_complete_within_times_out_slow_provider() {
        let provider = SlowProvider {
            delay: Duration::from_millis(500),
        };
        let request = ChatRequest::new(vec![ChatMessage::user("hi")]);

        let err = complete_within(&provider, &request, Duration::from_millis(20))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ExternalTimeout);
        assert!(err.is_transport_failure());
    }

    #[tokio::test]
    async fn test_complete_within_returns_reply_in_time() {
        let provider = SlowProvider {
            delay: Duration::from_millis(5),
        };
        let request = ChatRequest::new(vec![ChatMessage::user("hi")]);

        let response = complete_within(&provider, &request, Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(response.content, "late");
    }

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::new(vec![ChatMessage::user("hi")])
            .with_temperature(0.4)
            .with_reasoning_effort(Some(ReasoningEffort::High))
            .with_json_output();

        assert!(request.temperature.is_some());
        assert_eq!(request.reasoning_effort, Some(ReasoningEffort::High));
        assert!(request.json_output);
    }

    #[test]
    fn test_no_provider_without_key() {
        assert!(build_llm_provider(&LlmConfig::default()).unwrap().is_none());
    }
}
