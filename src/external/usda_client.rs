// ABOUTME: USDA FoodData Central API client for nutritional data retrieval
// ABOUTME: Searches foods and reads the energy nutrient of the best match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! Alternative nutrition source selected with `NUTRITION_PROVIDER=usda`. A
//! query is resolved with one `foods/search` call (`pageSize=1`); the energy
//! figure is taken from the first result's nutrients.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use super::{status_error, transport_error, FoodMatch, NutritionLookup};
use crate::config::NutritionConfig;
use async_trait::async_trait;
use mealwise_core::errors::{AppError, AppResult};
use serde::Deserialize;
use std::time::Duration;

const SERVICE: &str = "USDA API";

/// USDA nutrient number for Energy (kcal)
const ENERGY_NUTRIENT_ID: u32 = 1008;

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: Option<String>,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl From<&NutritionConfig> for UsdaClientConfig {
    fn from(config: &NutritionConfig) -> Self {
        Self {
            api_key: config.usda_api_key.clone(),
            base_url: config.usda_base_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    #[serde(default)]
    description: String,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_id: Option<u32>,
    #[serde(default)]
    nutrient_name: String,
    #[serde(default)]
    unit_name: String,
    value: Option<f64>,
}

impl SearchFood {
    /// Energy in kcal, if the record carries it
    fn energy_kcal(&self) -> Option<f64> {
        self.food_nutrients
            .iter()
            .find(|n| {
                n.nutrient_id == Some(ENERGY_NUTRIENT_ID)
                    || (n.nutrient_name.starts_with("Energy")
                        && n.unit_name.eq_ignore_ascii_case("kcal"))
            })
            .and_then(|n| n.value)
    }
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: UsdaClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl NutritionLookup for UsdaClient {
    fn name(&self) -> &'static str {
        "usda"
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn lookup(&self, query: &str) -> AppResult<Option<FoodMatch>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config_missing("USDA API key not configured"))?;

        let url = format!("{}/foods/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query), ("pageSize", "1"), ("api_key", api_key)])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(SERVICE, status, &body));
        }

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("JSON parse error: {e}"))
        })?;

        Ok(search_response.foods.into_iter().next().map(|food| FoodMatch {
            calories: food.energy_kcal(),
            description: food.description,
        }))
    }
}
