// ABOUTME: Canned diet program set served in fallback generation mode
// ABOUTME: Fixed, schema-valid programs indistinguishable in shape from generated ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealwise_core::models::{DailyMeals, DietProgram, NutritionTargets, ProgramGenerationResult};

fn text(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// The fixed program set
#[must_use]
pub fn fallback_programs() -> ProgramGenerationResult {
    ProgramGenerationResult {
        programs: vec![
            DietProgram {
                id: "balanced-mediterranean".to_owned(),
                name: "Balanced Mediterranean".to_owned(),
                daily_calories: 1800.0,
                description: "Whole grains, vegetables, olive oil and lean protein in moderate portions.".to_owned(),
                daily_meals: DailyMeals {
                    breakfast: "Greek yogurt with berries, walnuts and a drizzle of honey".to_owned(),
                    lunch: "Quinoa salad with chickpeas, cucumber, tomato and feta".to_owned(),
                    dinner: "Baked salmon with roasted vegetables and brown rice".to_owned(),
                    snacks: "An apple and a handful of almonds".to_owned(),
                },
                weekly_plan: "Fish twice a week, legumes three times, poultry twice; one flexible meal on the weekend.".to_owned(),
                nutrition_targets: NutritionTargets {
                    protein: "25%".to_owned(),
                    carbs: "45%".to_owned(),
                    fat: "30%".to_owned(),
                },
                tips: text(&[
                    "Cook with olive oil instead of butter",
                    "Fill half the plate with vegetables",
                    "Drink water with every meal",
                ]),
                notes: "A sustainable default for most goals.".to_owned(),
            },
            DietProgram {
                id: "high-protein".to_owned(),
                name: "High Protein".to_owned(),
                daily_calories: 2000.0,
                description: "Protein at every meal to support satiety and muscle retention.".to_owned(),
                daily_meals: DailyMeals {
                    breakfast: "Three-egg omelette with spinach and wholegrain toast".to_owned(),
                    lunch: "Grilled chicken breast with lentils and mixed greens".to_owned(),
                    dinner: "Lean beef stir-fry with vegetables and buckwheat noodles".to_owned(),
                    snacks: "Cottage cheese with pineapple; protein shake after training".to_owned(),
                },
                weekly_plan: "Rotate chicken, fish, eggs, beef and tofu; strength training three times a week.".to_owned(),
                nutrition_targets: NutritionTargets {
                    protein: "35%".to_owned(),
                    carbs: "35%".to_owned(),
                    fat: "30%".to_owned(),
                },
                tips: text(&[
                    "Aim for 25-40 g of protein per meal",
                    "Prepare proteins in bulk twice a week",
                    "Pair protein with fibre to stay full longer",
                ]),
                notes: "Consult a professional if you have kidney conditions.".to_owned(),
            },
            DietProgram {
                id: "plant-forward".to_owned(),
                name: "Plant Forward".to_owned(),
                daily_calories: 1700.0,
                description: "Mostly plant-based meals rich in fibre, with optional dairy and eggs.".to_owned(),
                daily_meals: DailyMeals {
                    breakfast: "Overnight oats with chia seeds, banana and peanut butter".to_owned(),
                    lunch: "Black bean and sweet potato bowl with avocado".to_owned(),
                    dinner: "Tofu and vegetable curry with basmati rice".to_owned(),
                    snacks: "Hummus with carrot sticks; a pear".to_owned(),
                },
                weekly_plan: "Two fully plant-based days, legumes daily, eggs or dairy on the remaining days.".to_owned(),
                nutrition_targets: NutritionTargets {
                    protein: "20%".to_owned(),
                    carbs: "50%".to_owned(),
                    fat: "30%".to_owned(),
                },
                tips: text(&[
                    "Combine legumes and grains for complete protein",
                    "Consider a vitamin B12 supplement",
                    "Season with herbs and spices instead of salt",
                ]),
                notes: "Easy to adapt to a fully vegan diet.".to_owned(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_set_is_schema_valid() {
        let result = fallback_programs();
        assert!(result.validate().is_ok());
        assert_eq!(result.programs.len(), 3);
    }

    #[test]
    fn test_fallback_set_is_fixed() {
        assert_eq!(fallback_programs(), fallback_programs());
    }
}
