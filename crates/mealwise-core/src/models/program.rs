// ABOUTME: Diet program schema shared by generated and fallback program sets
// ABOUTME: Defines DietProgram, its nested blocks, and the exactly-three-programs invariant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Number of alternative programs in every generation result
pub const PROGRAM_COUNT: usize = 3;

/// Meals for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMeals {
    /// Breakfast suggestion
    pub breakfast: String,
    /// Lunch suggestion
    pub lunch: String,
    /// Dinner suggestion
    pub dinner: String,
    /// Snack suggestions
    pub snacks: String,
}

/// Macronutrient targets, free text such as `"120 g"` or `"30%"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Protein target
    pub protein: String,
    /// Carbohydrate target
    pub carbs: String,
    /// Fat target
    pub fat: String,
}

/// One alternative diet program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietProgram {
    /// Stable identifier within the result set
    pub id: String,
    /// Display name
    pub name: String,
    /// Daily energy target in kcal
    pub daily_calories: f64,
    /// Short description
    pub description: String,
    /// Daily meal plan
    pub daily_meals: DailyMeals,
    /// Weekly structure
    pub weekly_plan: String,
    /// Macronutrient targets
    pub nutrition_targets: NutritionTargets,
    /// Practical tips
    pub tips: Vec<String>,
    /// Additional notes
    pub notes: String,
}

impl DietProgram {
    /// Check the populated-field invariants
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        let label = if self.id.trim().is_empty() {
            self.name.as_str()
        } else {
            self.id.as_str()
        };

        require_text("id", &self.id, label)?;
        require_text("name", &self.name, label)?;
        if !self.daily_calories.is_finite() || self.daily_calories <= 0.0 {
            return Err(format!(
                "program '{label}': dailyCalories must be a positive number"
            ));
        }

        let meals = &self.daily_meals;
        require_text("dailyMeals.breakfast", &meals.breakfast, label)?;
        require_text("dailyMeals.lunch", &meals.lunch, label)?;
        require_text("dailyMeals.dinner", &meals.dinner, label)?;
        require_text("dailyMeals.snacks", &meals.snacks, label)?;

        let targets = &self.nutrition_targets;
        require_text("nutritionTargets.protein", &targets.protein, label)?;
        require_text("nutritionTargets.carbs", &targets.carbs, label)?;
        require_text("nutritionTargets.fat", &targets.fat, label)
    }
}

fn require_text(field: &str, value: &str, program: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("program '{program}': {field} must not be empty"))
    } else {
        Ok(())
    }
}

/// Set of alternative programs returned by generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramGenerationResult {
    /// Exactly [`PROGRAM_COUNT`] programs on success
    pub programs: Vec<DietProgram>,
}

impl ProgramGenerationResult {
    /// Check the set-level and per-program invariants
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.programs.len() != PROGRAM_COUNT {
            return Err(format!(
                "expected exactly {PROGRAM_COUNT} programs, got {}",
                self.programs.len()
            ));
        }
        self.programs.iter().try_for_each(DietProgram::validate)
    }
}

/// Free-text personalized plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Plan text
    pub plan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(id: &str) -> DietProgram {
        DietProgram {
            id: id.to_owned(),
            name: "Balanced".to_owned(),
            daily_calories: 1800.0,
            description: "Balanced plate".to_owned(),
            daily_meals: DailyMeals {
                breakfast: "Oats".to_owned(),
                lunch: "Lentil soup".to_owned(),
                dinner: "Grilled fish".to_owned(),
                snacks: "Yogurt".to_owned(),
            },
            weekly_plan: "Repeat with variations".to_owned(),
            nutrition_targets: NutritionTargets {
                protein: "25%".to_owned(),
                carbs: "45%".to_owned(),
                fat: "30%".to_owned(),
            },
            tips: vec!["Drink water".to_owned()],
            notes: String::new(),
        }
    }

    #[test]
    fn test_three_valid_programs_pass() {
        let result = ProgramGenerationResult {
            programs: vec![program("a"), program("b"), program("c")],
        };
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_wrong_count_fails() {
        let result = ProgramGenerationResult {
            programs: vec![program("a"), program("b")],
        };
        let err = result.validate().unwrap_err();
        assert!(err.contains("exactly 3"));
    }

    #[test]
    fn test_empty_meal_slot_fails() {
        let mut bad = program("b");
        bad.daily_meals.snacks = "  ".to_owned();
        let result = ProgramGenerationResult {
            programs: vec![program("a"), bad, program("c")],
        };
        let err = result.validate().unwrap_err();
        assert!(err.contains("dailyMeals.snacks"));
    }

    #[test]
    fn test_non_positive_calories_fail() {
        let mut bad = program("a");
        bad.daily_calories = 0.0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let value = serde_json::to_value(program("a")).unwrap();
        assert!(value.get("dailyCalories").is_some());
        assert!(value.get("dailyMeals").is_some());
        assert!(value.get("nutritionTargets").is_some());
        assert!(value.get("weeklyPlan").is_some());
    }
}
