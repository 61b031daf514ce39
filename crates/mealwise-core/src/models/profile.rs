// ABOUTME: User profile and questionnaire answer models with tolerant decoding
// ABOUTME: Every profile attribute is optional; absent values render as an explicit marker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages::UNSPECIFIED;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Free-form user attributes; none of them is mandatory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Age in years
    pub age: Option<Value>,
    /// Height in centimetres
    pub height: Option<Value>,
    /// Weight in kilograms
    pub weight: Option<Value>,
    /// Activity level (sedentary, light, moderate, active, very active)
    pub activity_level: Option<Value>,
    /// Goal key (lose, gain, maintain, ...)
    pub goal: Option<Value>,
    /// Gender, used for energy estimates when present
    pub gender: Option<Value>,
    /// Any further attributes sent by the client
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UserProfile {
    /// Labelled core attributes in a fixed order
    #[must_use]
    pub fn core_fields(&self) -> [(&'static str, Option<&Value>); 6] {
        [
            ("Age", self.age.as_ref()),
            ("Gender", self.gender.as_ref()),
            ("Height (cm)", self.height.as_ref()),
            ("Weight (kg)", self.weight.as_ref()),
            ("Activity level", self.activity_level.as_ref()),
            ("Goal", self.goal.as_ref()),
        ]
    }

    /// Age as a number when it can be read as one
    #[must_use]
    pub fn age_years(&self) -> Option<f64> {
        self.age.as_ref().and_then(numeric)
    }

    /// Height as a number when it can be read as one
    #[must_use]
    pub fn height_cm(&self) -> Option<f64> {
        self.height.as_ref().and_then(numeric)
    }

    /// Weight as a number when it can be read as one
    #[must_use]
    pub fn weight_kg(&self) -> Option<f64> {
        self.weight.as_ref().and_then(numeric)
    }

    /// Text attribute, `None` when absent or blank
    #[must_use]
    pub fn text(value: Option<&Value>) -> Option<String> {
        match value? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Questionnaire answers keyed by question; any JSON value is accepted
///
/// Keys iterate in sorted order so anything rendered from the answers is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionnaireAnswers(pub Map<String, Value>);

impl QuestionnaireAnswers {
    /// Iterate answers in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of answers
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no answers were given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for QuestionnaireAnswers {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Render a possibly-absent value for display; absent, null and blank become the marker
#[must_use]
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNSPECIFIED.to_owned(),
        Some(Value::String(s)) if s.trim().is_empty() => UNSPECIFIED.to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number > 0.0).then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_profile_decodes() {
        let profile: UserProfile = serde_json::from_value(json!({})).unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_profile_keeps_unknown_attributes() {
        let profile: UserProfile =
            serde_json::from_value(json!({"age": 30, "allergies": ["nuts"]})).unwrap();
        assert_eq!(profile.age_years(), Some(30.0));
        assert_eq!(profile.extra["allergies"], json!(["nuts"]));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let profile: UserProfile =
            serde_json::from_value(json!({"height": "170", "weight": "abc"})).unwrap();
        assert_eq!(profile.height_cm(), Some(170.0));
        assert_eq!(profile.weight_kg(), None);
    }

    #[test]
    fn test_render_value_marker() {
        assert_eq!(render_value(None), "unspecified");
        assert_eq!(render_value(Some(&Value::Null)), "unspecified");
        assert_eq!(render_value(Some(&json!("  "))), "unspecified");
        assert_eq!(render_value(Some(&json!(3))), "3");
        assert_eq!(render_value(Some(&json!({"a": [1, 2]}))), r#"{"a":[1,2]}"#);
    }
}
