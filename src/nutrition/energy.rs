// ABOUTME: Energy expenditure estimates for personalized calorie targets
// ABOUTME: Mifflin-St Jeor BMR, activity multipliers, and goal adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily energy targets
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use mealwise_core::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Lowest BMR reported
const MIN_BMR_KCAL: f64 = 1000.0;
/// Lowest daily target reported after goal adjustment
const MIN_TARGET_KCAL: f64 = 1200.0;
/// Daily deficit for weight loss
const LOSS_ADJUSTMENT_KCAL: f64 = -500.0;
/// Daily surplus for weight or muscle gain
const GAIN_ADJUSTMENT_KCAL: f64 = 300.0;

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    /// Male constant (+5)
    Male,
    /// Female constant (-161)
    Female,
    /// Midpoint of the two constants
    Unspecified,
}

impl Gender {
    /// Read a free-text gender attribute
    #[must_use]
    pub fn from_text(text: Option<&str>) -> Self {
        match text.map(str::to_lowercase).as_deref() {
            Some("male" | "m" | "man") => Self::Male,
            Some("female" | "f" | "woman") => Self::Female,
            _ => Self::Unspecified,
        }
    }

    const fn constant(self) -> f64 {
        match self {
            Self::Male => 5.0,
            Self::Female => -161.0,
            Self::Unspecified => -78.0,
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (hard training 2x/day)
    ExtraActive,
}

impl ActivityLevel {
    /// Read a free-text activity level; unknown or absent text is sedentary
    #[must_use]
    pub fn from_text(text: Option<&str>) -> Self {
        let normalized = text
            .unwrap_or_default()
            .to_lowercase()
            .replace(['_', '-'], " ");
        match normalized.trim() {
            "light" | "lightly active" => Self::LightlyActive,
            "moderate" | "moderately active" => Self::ModeratelyActive,
            "active" | "very active" => Self::VeryActive,
            "extra active" | "athlete" => Self::ExtraActive,
            _ => Self::Sedentary,
        }
    }

    /// TDEE multiplier
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Returns `None` outside the ranges the formula is validated for
/// (weight and height up to 300, age 10 to 120).
#[must_use]
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: f64, gender: Gender) -> Option<f64> {
    let in_range = weight_kg > 0.0
        && weight_kg <= 300.0
        && height_cm > 0.0
        && height_cm <= 300.0
        && (10.0..=120.0).contains(&age);
    if !in_range {
        return None;
    }
    let bmr = (-5.0f64).mul_add(age, 6.25f64.mul_add(height_cm, 10.0 * weight_kg))
        + gender.constant();
    Some(bmr.max(MIN_BMR_KCAL))
}

/// Calorie adjustment for a goal key
#[must_use]
pub fn goal_adjustment(goal: Option<&str>) -> f64 {
    match goal.map(str::to_lowercase).as_deref() {
        Some("lose" | "loss" | "weight loss" | "cut") => LOSS_ADJUSTMENT_KCAL,
        Some("gain" | "muscle" | "bulk" | "weight gain") => GAIN_ADJUSTMENT_KCAL,
        _ => 0.0,
    }
}

/// Daily calorie target for a profile, rounded to whole kcal
///
/// `None` when age, height or weight are missing or out of range.
#[must_use]
pub fn daily_calorie_target(profile: &UserProfile) -> Option<f64> {
    let gender = Gender::from_text(UserProfile::text(profile.gender.as_ref()).as_deref());
    let bmr = mifflin_st_jeor(
        profile.weight_kg()?,
        profile.height_cm()?,
        profile.age_years()?,
        gender,
    )?;
    let activity =
        ActivityLevel::from_text(UserProfile::text(profile.activity_level.as_ref()).as_deref());
    let goal = UserProfile::text(profile.goal.as_ref());

    let target = bmr.mul_add(activity.factor(), goal_adjustment(goal.as_deref()));
    Some(target.max(MIN_TARGET_KCAL).round())
}
