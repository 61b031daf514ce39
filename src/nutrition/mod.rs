// ABOUTME: Photo calorie estimation pipeline
// ABOUTME: Label resolution, partial-failure aggregation, upload lifecycle, and energy math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Calorie Estimation
//!
//! Data flow: image → [`crate::vision::LabelDetector`] → labels →
//! [`CalorieAggregator`] → [`NutritionResolver`] (once per label) →
//! [`mealwise_core::models::CalorieEstimate`].
//!
//! A single label's failure never aborts the aggregation; it shows up only as
//! that item's `error` annotation.

/// Fan-out over detected labels with order-preserving consolidation
pub mod aggregator;
/// Energy expenditure estimates (Mifflin-St Jeor, activity factors)
pub mod energy;
/// Upload → detection → aggregation orchestration
pub mod estimator;
/// One label to one lookup result
pub mod resolver;

pub use aggregator::CalorieAggregator;
pub use estimator::CalorieEstimator;
pub use resolver::NutritionResolver;
