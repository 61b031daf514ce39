// ABOUTME: Mock nutrition lookup for tests and local development
// ABOUTME: Answers from a scripted table and records every query it receives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{FoodMatch, NutritionLookup};
use async_trait::async_trait;
use mealwise_core::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted answer for one query
#[derive(Debug, Clone)]
pub enum MockAnswer {
    /// Matched food with this calorie figure
    Calories(f64),
    /// Matched food without a calorie figure
    NoCalories,
    /// Service error
    Fail(String),
    /// Respond only after this delay, then with the inner answer
    Delayed(Duration, Box<MockAnswer>),
}

/// Mock nutrition lookup (no API calls)
///
/// Queries with no scripted answer resolve to "no match".
pub struct MockNutritionLookup {
    configured: bool,
    answers: HashMap<String, MockAnswer>,
    calls: Mutex<Vec<String>>,
}

impl Default for MockNutritionLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNutritionLookup {
    /// Configured mock with no scripted answers
    #[must_use]
    pub fn new() -> Self {
        Self {
            configured: true,
            answers: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock that reports missing credentials
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Script the answer for `query`
    #[must_use]
    pub fn with_answer(mut self, query: impl Into<String>, answer: MockAnswer) -> Self {
        self.answers.insert(query.into(), answer);
        self
    }

    /// Queries received so far, in call order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, query: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_owned());
        }
    }
}

#[async_trait]
impl NutritionLookup for MockNutritionLookup {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn lookup(&self, query: &str) -> AppResult<Option<FoodMatch>> {
        self.record(query);
        let mut answer = self.answers.get(query).cloned();
        while let Some(MockAnswer::Delayed(delay, inner)) = answer {
            tokio::time::sleep(delay).await;
            answer = Some(*inner);
        }

        match answer {
            None | Some(MockAnswer::Delayed(..)) => Ok(None),
            Some(MockAnswer::Calories(calories)) => Ok(Some(FoodMatch {
                description: query.to_owned(),
                calories: Some(calories),
            })),
            Some(MockAnswer::NoCalories) => Ok(Some(FoodMatch {
                description: query.to_owned(),
                calories: None,
            })),
            Some(MockAnswer::Fail(message)) => Err(AppError::external_service("mock", message)),
        }
    }
}
