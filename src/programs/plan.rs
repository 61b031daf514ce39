// ABOUTME: Personalized free-text nutrition plan generator
// ABOUTME: Computes a calorie target and either asks the model or renders a template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::goals::goal_label;
use super::GenerationSettings;
use crate::config::GenerationMode;
use crate::llm::prompts::NUTRITION_PLAN_SYSTEM_PROMPT;
use crate::llm::{complete_within, ChatMessage, ChatRequest, LlmProvider};
use crate::nutrition::energy::daily_calorie_target;
use mealwise_core::constants::messages::UNSPECIFIED;
use mealwise_core::errors::{AppError, AppResult};
use mealwise_core::models::{render_value, PlanResponse, UserProfile};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Produces the free-text personalized plan
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
    settings: GenerationSettings,
}

impl PlanGenerator {
    /// Create a plan generator; `provider` is `None` when no credentials are configured
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Generate a plan for `profile`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `live` generation has no credentials, or the
    /// model call's error.
    #[instrument(skip_all, fields(mode = %self.settings.mode))]
    pub async fn generate(&self, profile: &UserProfile) -> AppResult<PlanResponse> {
        let target = daily_calorie_target(profile);
        if self.settings.mode == GenerationMode::Fallback {
            return Ok(PlanResponse {
                plan: template_plan(profile, target),
            });
        }

        let Some(provider) = self.provider.as_deref() else {
            if self.settings.mode == GenerationMode::LiveWithFallback {
                warn!("Language model credentials not configured, serving template plan");
                return Ok(PlanResponse {
                    plan: template_plan(profile, target),
                });
            }
            return Err(AppError::config_missing(
                "Language model credentials not configured (OPENAI_API_KEY)",
            ));
        };

        let request = ChatRequest::new(vec![
            ChatMessage::system(NUTRITION_PLAN_SYSTEM_PROMPT),
            ChatMessage::user(describe_profile(profile, target)),
        ])
        .with_reasoning_effort(self.settings.reasoning_effort);

        match complete_within(provider, &request, self.settings.timeout).await {
            Ok(response) if !response.content.trim().is_empty() => {
                info!(model = %response.model, "Personalized plan generated");
                Ok(PlanResponse {
                    plan: response.content.trim().to_owned(),
                })
            }
            Ok(_) => Err(AppError::external_service(
                provider.name(),
                "model returned an empty plan",
            )),
            Err(e)
                if self.settings.mode == GenerationMode::LiveWithFallback
                    && e.is_transport_failure() =>
            {
                warn!(error = %e, "Language model unavailable, serving template plan");
                Ok(PlanResponse {
                    plan: template_plan(profile, target),
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn target_text(target: Option<f64>) -> String {
    target.map_or_else(|| UNSPECIFIED.to_owned(), |kcal| format!("{kcal:.0} kcal"))
}

fn goal_text(profile: &UserProfile) -> String {
    UserProfile::text(profile.goal.as_ref())
        .map_or_else(|| UNSPECIFIED.to_owned(), |goal| goal_label(&goal).into_owned())
}

/// Profile rendering sent to the model
fn describe_profile(profile: &UserProfile, target: Option<f64>) -> String {
    let mut text = String::from("Create a personalized nutrition plan for this person:\n");
    for (label, value) in profile.core_fields() {
        let _ = writeln!(text, "- {label}: {}", render_value(value));
    }
    for (key, value) in &profile.extra {
        let _ = writeln!(text, "- {key}: {}", render_value(Some(value)));
    }
    let _ = writeln!(text, "- Estimated daily calorie target: {}", target_text(target));
    text
}

/// Deterministic plan used without a model
fn template_plan(profile: &UserProfile, target: Option<f64>) -> String {
    format!(
        "Personalized plan\nGoal: {}\nActivity level: {}\nDaily calorie target: {}\n\
         Meals: three balanced meals and one snack, protein at every meal.\n\
         Tips: drink water through the day; prefer whole foods; keep portions consistent.",
        goal_text(profile),
        render_value(profile.activity_level.as_ref()),
        target_text(target),
    )
}
