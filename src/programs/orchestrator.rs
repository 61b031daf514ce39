// ABOUTME: Generation orchestrator composing prompt, language model, and parser
// ABOUTME: Applies the configured generation mode, including the canned fallback set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{build_program_prompt, fallback_programs, parse_program_response};
use crate::config::{GenerationMode, ReasoningEffort, ServerConfig};
use crate::llm::prompts::DIET_PROGRAMS_SYSTEM_PROMPT;
use crate::llm::{complete_within, ChatMessage, ChatRequest, LlmProvider};
use mealwise_core::errors::{AppError, AppResult};
use mealwise_core::models::{ProgramGenerationResult, QuestionnaireAnswers, UserProfile};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Sampling temperature for program generation
const PROGRAM_TEMPERATURE: f32 = 0.7;

/// Generation behavior shared by the orchestrator and the plan generator
#[derive(Debug, Clone, Copy)]
pub struct GenerationSettings {
    /// Live, fallback, or live with fallback
    pub mode: GenerationMode,
    /// Optional reasoning-effort hint
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Bound on one model call
    pub timeout: Duration,
}

impl GenerationSettings {
    /// Settings from the process configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            mode: config.generation_mode,
            reasoning_effort: config.llm.reasoning_effort,
            timeout: config.llm.timeout(),
        }
    }
}

/// Produces diet program sets
#[derive(Clone)]
pub struct GenerationOrchestrator {
    provider: Option<Arc<dyn LlmProvider>>,
    settings: GenerationSettings,
}

impl GenerationOrchestrator {
    /// Create an orchestrator; `provider` is `None` when no credentials are configured
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Configured generation mode
    #[must_use]
    pub const fn mode(&self) -> GenerationMode {
        self.settings.mode
    }

    /// Whether a model can be called
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate three diet programs
    ///
    /// One model call per request, no retries.
    ///
    /// # Errors
    ///
    /// - `ConfigMissing` when `live` generation has no credentials
    /// - transport errors from the model call (unless falling back)
    /// - `GenerationParseFailed` / `GenerationSchemaInvalid` for unusable output
    #[instrument(skip(self, profile, answers), fields(mode = %self.settings.mode, answers = answers.len()))]
    pub async fn generate(
        &self,
        goal: &str,
        profile: &UserProfile,
        answers: &QuestionnaireAnswers,
    ) -> AppResult<ProgramGenerationResult> {
        if self.settings.mode == GenerationMode::Fallback {
            info!("Serving fallback diet programs");
            return Ok(fallback_programs());
        }

        let Some(provider) = self.provider.as_deref() else {
            if self.settings.mode == GenerationMode::LiveWithFallback {
                warn!("Language model credentials not configured, serving fallback diet programs");
                return Ok(fallback_programs());
            }
            return Err(AppError::config_missing(
                "Language model credentials not configured (OPENAI_API_KEY)",
            ));
        };

        let request = ChatRequest::new(vec![
            ChatMessage::system(DIET_PROGRAMS_SYSTEM_PROMPT),
            ChatMessage::user(build_program_prompt(goal, profile, answers)),
        ])
        .with_temperature(PROGRAM_TEMPERATURE)
        .with_reasoning_effort(self.settings.reasoning_effort)
        .with_json_output();

        let response = match complete_within(provider, &request, self.settings.timeout).await {
            Ok(response) => response,
            Err(e)
                if self.settings.mode == GenerationMode::LiveWithFallback
                    && e.is_transport_failure() =>
            {
                warn!(error = %e, "Language model unavailable, serving fallback diet programs");
                return Ok(fallback_programs());
            }
            Err(e) => return Err(e),
        };

        let result = parse_program_response(&response.content).map_err(|e| {
            warn!(kind = ?e.kind(), reason = e.reason(), "Unusable diet program response");
            AppError::from(e)
        })?;
        info!(model = %response.model, "Diet programs generated");
        Ok(result)
    }
}
