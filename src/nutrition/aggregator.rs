// ABOUTME: Calorie aggregator fanning out nutrition lookups over detected labels
// ABOUTME: Bounded concurrency, detection order preserved, unconfigured short-circuit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::NutritionResolver;
use futures_util::stream::{self, StreamExt};
use mealwise_core::constants::messages::NUTRITION_NOT_CONFIGURED;
use mealwise_core::models::CalorieEstimate;
use tracing::{info, instrument};

/// Consolidates per-label lookups into one [`CalorieEstimate`]
///
/// The `items` of the result always match the input labels one to one, in
/// input order, whatever order the lookups complete in.
#[derive(Clone)]
pub struct CalorieAggregator {
    resolver: NutritionResolver,
    max_concurrent: usize,
}

impl CalorieAggregator {
    /// Create an aggregator running at most `max_concurrent` lookups at once
    #[must_use]
    pub fn new(resolver: NutritionResolver, max_concurrent: usize) -> Self {
        Self {
            resolver,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Whether lookups will be attempted at all
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.resolver.is_configured()
    }

    /// Name of the nutrition service behind the resolver
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.resolver.provider_name()
    }

    /// Resolve every label and consolidate the results
    #[instrument(skip_all, fields(labels = labels.len()))]
    pub async fn aggregate(&self, labels: Vec<String>) -> CalorieEstimate {
        if !self.resolver.is_configured() {
            info!("Nutrition lookup not configured, returning raw labels");
            return CalorieEstimate::unconfigured(labels, NUTRITION_NOT_CONFIGURED);
        }

        let items = stream::iter(labels)
            .map(|label| {
                let resolver = self.resolver.clone();
                async move { resolver.resolve(&label).await }
            })
            .buffered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        let estimate = CalorieEstimate::from_items(items);
        info!(
            items = estimate.items.len(),
            failures = estimate.failure_count(),
            total_calories = ?estimate.total_calories,
            "Calorie estimate aggregated"
        );
        estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{MockAnswer, MockNutritionLookup};
    use std::sync::Arc;
    use std::time::Duration;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn aggregator(mock: &Arc<MockNutritionLookup>, max_concurrent: usize) -> CalorieAggregator {
        CalorieAggregator::new(
            NutritionResolver::new(mock.clone(), Duration::from_secs(2)),
            max_concurrent,
        )
    }

    #[tokio::test]
    async fn test_order_preserved_when_completion_order_differs() {
        let mock = Arc::new(
            MockNutritionLookup::new()
                .with_answer(
                    "rice",
                    MockAnswer::Delayed(
                        Duration::from_millis(80),
                        Box::new(MockAnswer::Calories(200.0)),
                    ),
                )
                .with_answer("chicken", MockAnswer::Calories(165.0))
                .with_answer(
                    "salad",
                    MockAnswer::Delayed(
                        Duration::from_millis(20),
                        Box::new(MockAnswer::Calories(33.0)),
                    ),
                ),
        );

        let estimate = aggregator(&mock, 3)
            .aggregate(labels(&["rice", "chicken", "salad"]))
            .await;

        let names: Vec<_> = estimate.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(names, vec!["rice", "chicken", "salad"]);
        assert_eq!(estimate.total_calories, Some(398));
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let mock = Arc::new(
            MockNutritionLookup::new()
                .with_answer("rice", MockAnswer::Calories(205.0))
                .with_answer("chicken", MockAnswer::Fail("boom".to_owned())),
        );

        let estimate = aggregator(&mock, 2)
            .aggregate(labels(&["rice", "chicken", "rice", "fork"]))
            .await;

        assert_eq!(estimate.items.len(), 4);
        assert_eq!(estimate.failure_count(), 1);
        assert!(estimate.items[1].is_failure());
        assert_eq!(estimate.items[3].calories(), None);
        assert_eq!(estimate.total_calories, Some(410));
        assert!(estimate.warning.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_short_circuits_without_lookups() {
        let mock = Arc::new(MockNutritionLookup::unconfigured());

        let estimate = aggregator(&mock, 4)
            .aggregate(labels(&["rice", "chicken"]))
            .await;

        assert_eq!(estimate.total_calories, None);
        assert_eq!(estimate.items.len(), 2);
        assert!(estimate.items.iter().all(|i| i.calories().is_none()));
        assert!(estimate.warning.is_some());
        assert!(mock.calls().is_empty());
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_aggregate_future_is_send() {
        let mock = Arc::new(MockNutritionLookup::new());
        let aggregator = aggregator(&mock, 2);
        let future = aggregator.aggregate(labels(&["rice"]));
        assert_send(&future);
    }

    #[tokio::test]
    async fn test_empty_label_list() {
        let mock = Arc::new(MockNutritionLookup::new());
        let estimate = aggregator(&mock, 4).aggregate(Vec::new()).await;
        assert_eq!(estimate.total_calories, Some(0));
        assert!(estimate.items.is_empty());
    }
}
