// ABOUTME: External nutrition API clients (Nutritionix, USDA FoodData Central)
// ABOUTME: Defines the NutritionLookup contract consumed by the nutrition resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! Every nutrition service is reached through [`NutritionLookup`]. A lookup
//! receives an already-sanitized query and reports one of three things: a
//! matched food (with or without an identifiable calorie figure), no match, or
//! an error. Turning those into per-label results is the resolver's job.

/// Test double with scripted answers
pub mod mock;
/// Nutritionix natural-language nutrients client
pub mod nutritionix_client;
/// USDA `FoodData` Central search client
pub mod usda_client;

pub use mock::{MockAnswer, MockNutritionLookup};
pub use nutritionix_client::{NutritionixClient, NutritionixClientConfig};
pub use usda_client::{UsdaClient, UsdaClientConfig};

use crate::config::{NutritionConfig, NutritionProviderKind};
use async_trait::async_trait;
use mealwise_core::errors::{AppError, AppResult};
use std::sync::Arc;

/// A food matched by a nutrition service
#[derive(Debug, Clone, PartialEq)]
pub struct FoodMatch {
    /// Service description of the matched food
    pub description: String,
    /// Energy in kcal when the service reports one
    pub calories: Option<f64>,
}

/// Contract for a nutrition lookup service
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Service identifier used in logs
    fn name(&self) -> &'static str;

    /// Whether credentials are present; unconfigured lookups are never called
    fn is_configured(&self) -> bool;

    /// Look up one sanitized query
    ///
    /// Returns `Ok(None)` when the service matched nothing.
    async fn lookup(&self, query: &str) -> AppResult<Option<FoodMatch>>;
}

/// Build the configured nutrition lookup client
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed
pub fn build_nutrition_lookup(config: &NutritionConfig) -> AppResult<Arc<dyn NutritionLookup>> {
    Ok(match config.provider {
        NutritionProviderKind::Nutritionix => {
            Arc::new(NutritionixClient::new(NutritionixClientConfig::from(config))?)
        }
        NutritionProviderKind::Usda => Arc::new(UsdaClient::new(UsdaClientConfig::from(config))?),
    })
}

/// Map a transport-level `reqwest` failure onto the error taxonomy
pub(crate) fn transport_error(service: &str, error: &reqwest::Error, timeout_secs: u64) -> AppError {
    if error.is_timeout() {
        AppError::external_timeout(service, timeout_secs)
    } else if error.is_connect() {
        AppError::external_unavailable(service, format!("Cannot connect: {error}"))
    } else {
        AppError::external_service(service, format!("Request failed: {error}"))
    }
}

/// Map a non-success HTTP status onto the error taxonomy
pub(crate) fn status_error(service: &str, status: reqwest::StatusCode, body: &str) -> AppError {
    let snippet: String = body.chars().take(200).collect();
    if status.is_server_error() {
        AppError::external_unavailable(service, format!("HTTP {status}: {snippet}"))
    } else {
        AppError::external_service(service, format!("HTTP {status}: {snippet}"))
    }
}
