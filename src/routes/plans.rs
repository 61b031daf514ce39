// ABOUTME: Personalized plan route taking a free-form user profile
// ABOUTME: Delegates to the plan generator and returns the plan text
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
use mealwise_core::models::{PlanResponse, UserProfile};
use std::sync::Arc;

/// Personalized plan routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the plan route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/generate-plan", post(Self::generate_plan))
            .with_state(resources)
    }

    async fn generate_plan(
        State(resources): State<Arc<ServerResources>>,
        profile: Result<Json<Option<UserProfile>>, JsonRejection>,
    ) -> Result<Json<PlanResponse>, AppError> {
        let Json(profile) = profile.map_err(|r| json_rejection(&r))?;
        let profile = profile.unwrap_or_default();
        let plan = resources.plan_generator.generate(&profile).await?;
        Ok(Json(plan))
    }
}
