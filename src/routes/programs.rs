// ABOUTME: Diet program generation route
// ABOUTME: Validates the request envelope and delegates to the generation orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json_rejection;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use mealwise_core::errors::AppError;
use mealwise_core::models::{ProgramGenerationResult, QuestionnaireAnswers, UserProfile};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for `POST /generate-diet-programs`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateProgramsRequest {
    /// Goal key such as `lose` or `gain`
    pub program_key: Option<String>,
    /// Questionnaire answers, absent and `null` both meaning none
    #[serde(default)]
    pub answers: Option<QuestionnaireAnswers>,
    /// Free-form user profile, absent and `null` both meaning empty
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
}

/// Diet program routes
pub struct ProgramRoutes;

impl ProgramRoutes {
    /// Create the program generation route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/generate-diet-programs", post(Self::generate_programs))
            .with_state(resources)
    }

    async fn generate_programs(
        State(resources): State<Arc<ServerResources>>,
        request: Result<Json<Option<GenerateProgramsRequest>>, JsonRejection>,
    ) -> Result<Json<ProgramGenerationResult>, AppError> {
        let Json(request) = request.map_err(|r| json_rejection(&r))?;
        let request = request.unwrap_or_default();
        let goal = request
            .program_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::missing_field("programKey"))?;

        info!(goal, "Diet program generation requested");
        let profile = request.user_profile.unwrap_or_default();
        let answers = request.answers.unwrap_or_default();
        let result = resources
            .orchestrator
            .generate(goal, &profile, &answers)
            .await?;
        Ok(Json(result))
    }
}
