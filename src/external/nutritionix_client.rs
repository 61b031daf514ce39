// ABOUTME: Nutritionix natural-language nutrients API client
// ABOUTME: Resolves a free-text food query to the first matched food and its calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutritionix client
//!
//! Posts `{"query": ...}` to `/v2/natural/nutrients` with the `x-app-id` and
//! `x-app-key` headers and reads the first entry of `foods`. Nutritionix
//! answers an unmatched query with HTTP 404, which is reported as no match.

use super::{status_error, transport_error, FoodMatch, NutritionLookup};
use crate::config::{NutritionConfig, NutritionixCredentials};
use async_trait::async_trait;
use mealwise_core::errors::{AppError, AppResult};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "Nutritionix";

/// Nutritionix client configuration
#[derive(Debug, Clone)]
pub struct NutritionixClientConfig {
    /// Application credentials; the client reports unconfigured without them
    pub credentials: Option<NutritionixCredentials>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl From<&NutritionConfig> for NutritionixClientConfig {
    fn from(config: &NutritionConfig) -> Self {
        Self {
            credentials: config.nutritionix.clone(),
            base_url: config.nutritionix_base_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

#[derive(Debug, Serialize)]
struct NutrientsRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct NutrientsResponse {
    #[serde(default)]
    foods: Vec<NutritionixFood>,
}

#[derive(Debug, Deserialize)]
struct NutritionixFood {
    #[serde(default)]
    food_name: String,
    nf_calories: Option<f64>,
}

/// Nutritionix API client
pub struct NutritionixClient {
    config: NutritionixClientConfig,
    http_client: reqwest::Client,
}

impl NutritionixClient {
    /// Create a new Nutritionix client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: NutritionixClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/v2/natural/nutrients",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl NutritionLookup for NutritionixClient {
    fn name(&self) -> &'static str {
        "nutritionix"
    }

    fn is_configured(&self) -> bool {
        self.config.credentials.is_some()
    }

    async fn lookup(&self, query: &str) -> AppResult<Option<FoodMatch>> {
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or_else(|| AppError::config_missing("Nutritionix credentials not configured"))?;

        let response = self
            .http_client
            .post(self.api_url())
            .header("x-app-id", &credentials.app_id)
            .header("x-app-key", &credentials.app_key)
            .json(&NutrientsRequest { query })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e, self.config.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(query, "Nutritionix matched no food");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(SERVICE, status, &body));
        }

        let parsed: NutrientsResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("JSON parse error: {e}"))
        })?;

        Ok(parsed.foods.into_iter().next().map(|food| FoodMatch {
            description: food.food_name,
            calories: food.nf_calories,
        }))
    }
}
