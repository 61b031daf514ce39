// ABOUTME: Goal key vocabulary for diet programs and plans
// ABOUTME: Maps known keys to display labels and renders unknown keys unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealwise_core::constants::messages::UNSPECIFIED;
use std::borrow::Cow;

/// Known goal keys with their display labels
pub const KNOWN_GOALS: &[(&str, &str)] = &[
    ("lose", "Weight loss"),
    ("gain", "Weight gain"),
    ("maintain", "Weight maintenance"),
    ("muscle", "Muscle gain"),
    ("healthy", "Healthy eating"),
];

/// Display label for a goal key
///
/// Unknown keys are a soft case and render as given; a blank key renders as
/// the "unspecified" marker.
#[must_use]
pub fn goal_label(key: &str) -> Cow<'_, str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Cow::Borrowed(UNSPECIFIED);
    }
    KNOWN_GOALS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(trimmed))
        .map_or(Cow::Borrowed(trimmed), |(_, label)| Cow::Borrowed(*label))
}
