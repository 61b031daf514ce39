// ABOUTME: Deterministic prompt construction for diet program generation
// ABOUTME: Renders goal, every profile field, every answer, and the verbatim output schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::goals::goal_label;
use crate::llm::prompts::DIET_PROGRAM_SCHEMA;
use mealwise_core::models::{render_value, QuestionnaireAnswers, UserProfile, PROGRAM_COUNT};
use std::fmt::Write;

/// Build the user prompt for diet program generation
///
/// Pure: identical inputs always give a byte-identical prompt. Answers and
/// extra profile attributes are rendered in key order, absent profile fields
/// as "unspecified", and nothing is truncated.
#[must_use]
pub fn build_program_prompt(
    goal: &str,
    profile: &UserProfile,
    answers: &QuestionnaireAnswers,
) -> String {
    let mut prompt = String::with_capacity(2048);

    let _ = writeln!(
        prompt,
        "Create exactly {PROGRAM_COUNT} alternative diet programs for the person below."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Goal: {} (key: {})", goal_label(goal), goal.trim());
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "User profile:");
    for (label, value) in profile.core_fields() {
        let _ = writeln!(prompt, "- {label}: {}", render_value(value));
    }
    for (key, value) in &profile.extra {
        let _ = writeln!(prompt, "- {key}: {}", render_value(Some(value)));
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Questionnaire answers:");
    if answers.is_empty() {
        let _ = writeln!(prompt, "- none provided");
    }
    for (key, value) in answers.iter() {
        let _ = writeln!(prompt, "- {key}: {}", render_value(Some(value)));
    }
    let _ = writeln!(prompt);

    let _ = writeln!(
        prompt,
        "Respond with one JSON object that follows this schema exactly, with {PROGRAM_COUNT} entries in \"programs\":"
    );
    prompt.push_str(DIET_PROGRAM_SCHEMA.trim_end());
    prompt.push('\n');
    prompt
}
