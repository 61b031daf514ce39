// ABOUTME: Centralized resource container shared by every HTTP handler
// ABOUTME: Builds the calorie pipeline, program orchestrator, and plan generator once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Collaborators are constructed once from [`ServerConfig`] and shared
//! read-only across requests. Nothing here holds per-request state.

use crate::config::{GenerationMode, ServerConfig};
use crate::external::{build_nutrition_lookup, NutritionLookup};
use crate::llm::{build_llm_provider, LlmProvider};
use crate::nutrition::{CalorieAggregator, CalorieEstimator, NutritionResolver};
use crate::programs::{GenerationOrchestrator, GenerationSettings, PlanGenerator};
use crate::vision::{build_label_detector, LabelDetector};
use mealwise_core::errors::AppResult;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Process configuration
    pub config: Arc<ServerConfig>,
    /// Photo-to-estimate pipeline
    pub estimator: CalorieEstimator,
    /// Diet program generation
    pub orchestrator: GenerationOrchestrator,
    /// Personalized plan generation
    pub plan_generator: PlanGenerator,
}

impl ServerResources {
    /// Build every collaborator from configuration
    ///
    /// Missing credentials are not an error here: the nutrition pipeline
    /// degrades to a warning, vision to the placeholder detector, and
    /// generation to fallback content or `ConfigMissing` at request time.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let lookup = build_nutrition_lookup(&config.nutrition)?;
        let detector = build_label_detector(&config.vision)?;
        let llm = build_llm_provider(&config.llm)?;

        if !lookup.is_configured() {
            warn!(
                provider = lookup.name(),
                "Nutrition lookup credentials missing; estimates will carry a warning"
            );
        }
        if config.vision.api_key.is_none() {
            warn!("Vision API key missing; using placeholder label detector");
        }
        if llm.is_none() {
            match config.generation_mode {
                GenerationMode::Live => warn!(
                    mode = %config.generation_mode,
                    "Language model API key missing; live generation will be unavailable"
                ),
                GenerationMode::LiveWithFallback => warn!(
                    mode = %config.generation_mode,
                    "Language model API key missing; serving fallback content"
                ),
                GenerationMode::Fallback => {}
            }
        }

        Ok(Self::with_collaborators(config, lookup, detector, llm))
    }

    /// Assemble resources from explicit collaborators
    #[must_use]
    pub fn with_collaborators(
        config: ServerConfig,
        lookup: Arc<dyn NutritionLookup>,
        detector: Arc<dyn LabelDetector>,
        llm: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        let resolver = NutritionResolver::new(lookup, config.nutrition.timeout());
        let aggregator = CalorieAggregator::new(resolver, config.nutrition.max_concurrent);
        let estimator =
            CalorieEstimator::new(detector, aggregator, config.uploads.directory.clone());

        let settings = GenerationSettings::from_config(&config);
        let orchestrator = GenerationOrchestrator::new(llm.clone(), settings);
        let plan_generator = PlanGenerator::new(llm, settings);

        info!(
            nutrition = estimator.aggregator().provider_name(),
            detector = estimator.detector_name(),
            mode = %settings.mode,
            "Server resources initialized"
        );

        Self {
            config: Arc::new(config),
            estimator,
            orchestrator,
            plan_generator,
        }
    }
}
