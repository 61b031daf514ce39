// ABOUTME: Domain model module exports for Mealwise request-scoped values
// ABOUTME: Nutrition lookup results, user profiles, questionnaire answers, and diet programs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Request-scoped domain values. Nothing here is persisted; every value is
//! created at request entry and dropped once the response is sent.

/// Calorie estimation values
pub mod nutrition;
/// User profile and questionnaire answers
pub mod profile;
/// Diet program schema and invariants
pub mod program;

pub use nutrition::{CalorieEstimate, LookupOutcome, NutritionLookupResult};
pub use profile::{render_value, QuestionnaireAnswers, UserProfile};
pub use program::{
    DailyMeals, DietProgram, NutritionTargets, PlanResponse, ProgramGenerationResult,
    PROGRAM_COUNT,
};
