// ABOUTME: Nutrition resolver mapping one detected label to one lookup result
// ABOUTME: Sanitizes the outbound query, bounds the call with a timeout, and isolates failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::external::NutritionLookup;
use crate::security::OutboundSanitizer;
use mealwise_core::constants::messages::LOOKUP_FAILED;
use mealwise_core::models::NutritionLookupResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Resolves single labels against a nutrition lookup service
///
/// `resolve` never fails: transport errors and timeouts become the `error`
/// result shape with a generic message, and the underlying cause is only
/// logged. The echoed label is always the original, unsanitized one.
#[derive(Clone)]
pub struct NutritionResolver {
    lookup: Arc<dyn NutritionLookup>,
    sanitizer: OutboundSanitizer,
    timeout: Duration,
}

impl NutritionResolver {
    /// Create a resolver over `lookup` with a per-call timeout
    #[must_use]
    pub fn new(lookup: Arc<dyn NutritionLookup>, timeout: Duration) -> Self {
        Self {
            lookup,
            sanitizer: OutboundSanitizer::default(),
            timeout,
        }
    }

    /// Whether the underlying lookup has credentials
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.lookup.is_configured()
    }

    /// Name of the underlying lookup service
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.lookup.name()
    }

    /// Resolve one label
    #[instrument(skip(self), fields(provider = self.lookup.name()))]
    pub async fn resolve(&self, label: &str) -> NutritionLookupResult {
        let Some(query) = self.sanitizer.lookup_token(label) else {
            debug!("Label has no searchable characters");
            return NutritionLookupResult::no_match(label);
        };

        match tokio::time::timeout(self.timeout, self.lookup.lookup(&query)).await {
            // A matched food without a calorie figure counts as zero
            Ok(Ok(Some(food))) => {
                NutritionLookupResult::resolved(label, food.calories.unwrap_or(0.0))
            }
            Ok(Ok(None)) => NutritionLookupResult::no_match(label),
            Ok(Err(e)) => {
                warn!(error = %e, "Nutrition lookup failed");
                NutritionLookupResult::failed(label, LOOKUP_FAILED)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Nutrition lookup timed out"
                );
                NutritionLookupResult::failed(label, LOOKUP_FAILED)
            }
        }
    }
}
