// ABOUTME: Calorie estimation models for photo-based meal analysis
// ABOUTME: NutritionLookupResult with its three wire shapes and the consolidated CalorieEstimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Outcome of resolving one detected label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A food matched; calories are rounded and never negative
    Resolved {
        /// Whole kilocalories
        calories: u32,
    },
    /// The lookup succeeded but nothing matched
    NoMatch,
    /// The lookup itself failed
    Failed {
        /// Client-safe error annotation
        error: String,
    },
}

/// Result of resolving one label, always present for every detected label
///
/// Serializes to exactly one of `{label, calories: n}`, `{label, calories: null}`
/// or `{label, calories: null, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireLookupResult", try_from = "WireLookupResult")]
pub struct NutritionLookupResult {
    /// Original, unsanitized label as detected
    pub label: String,
    /// Lookup outcome
    pub outcome: LookupOutcome,
}

impl NutritionLookupResult {
    /// Successful match; `raw_calories` is clamped at zero and rounded
    #[must_use]
    pub fn resolved(label: impl Into<String>, raw_calories: f64) -> Self {
        let calories = if raw_calories.is_finite() && raw_calories > 0.0 {
            raw_calories.round().min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        Self {
            label: label.into(),
            outcome: LookupOutcome::Resolved { calories },
        }
    }

    /// Lookup returned no matching food
    #[must_use]
    pub fn no_match(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: LookupOutcome::NoMatch,
        }
    }

    /// Lookup failed
    #[must_use]
    pub fn failed(label: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: LookupOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Calories when resolved
    #[must_use]
    pub const fn calories(&self) -> Option<u32> {
        match self.outcome {
            LookupOutcome::Resolved { calories } => Some(calories),
            LookupOutcome::NoMatch | LookupOutcome::Failed { .. } => None,
        }
    }

    /// Whether the lookup failed
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, LookupOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireLookupResult {
    label: String,
    calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<NutritionLookupResult> for WireLookupResult {
    fn from(result: NutritionLookupResult) -> Self {
        let (calories, error) = match result.outcome {
            LookupOutcome::Resolved { calories } => (Some(calories), None),
            LookupOutcome::NoMatch => (None, None),
            LookupOutcome::Failed { error } => (None, Some(error)),
        };
        Self {
            label: result.label,
            calories,
            error,
        }
    }
}

impl TryFrom<WireLookupResult> for NutritionLookupResult {
    type Error = String;

    fn try_from(wire: WireLookupResult) -> Result<Self, Self::Error> {
        let outcome = match (wire.calories, wire.error) {
            (Some(calories), None) => LookupOutcome::Resolved { calories },
            (None, None) => LookupOutcome::NoMatch,
            (None, Some(error)) => LookupOutcome::Failed { error },
            (Some(_), Some(_)) => {
                return Err(format!(
                    "lookup result for '{}' carries both calories and an error",
                    wire.label
                ))
            }
        };
        Ok(Self {
            label: wire.label,
            outcome,
        })
    }
}

/// Consolidated calorie estimate for one photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieEstimate {
    /// Sum of resolved item calories; `None` only when lookups are unconfigured
    pub total_calories: Option<u64>,
    /// One entry per detected label, in detection order
    pub items: Vec<NutritionLookupResult>,
    /// Present when the estimate was short-circuited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CalorieEstimate {
    /// Consolidate resolved items; unresolved items contribute zero but stay visible
    #[must_use]
    pub fn from_items(items: Vec<NutritionLookupResult>) -> Self {
        let total = items
            .iter()
            .filter_map(NutritionLookupResult::calories)
            .map(u64::from)
            .sum();
        Self {
            total_calories: Some(total),
            items,
            warning: None,
        }
    }

    /// Short-circuit estimate when nutrition lookups are not configured
    #[must_use]
    pub fn unconfigured(labels: Vec<String>, warning: impl Into<String>) -> Self {
        Self {
            total_calories: None,
            items: labels
                .into_iter()
                .map(NutritionLookupResult::no_match)
                .collect(),
            warning: Some(warning.into()),
        }
    }

    /// Number of items whose lookup failed
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_failure()).count()
    }
}
