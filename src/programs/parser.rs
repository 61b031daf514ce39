// ABOUTME: Defensive parser for language-model diet program responses
// ABOUTME: Extracts fenced or bare JSON, then validates the exactly-three-programs schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Program response parsing
//!
//! Attempts, first success wins:
//!
//! 1. the content of a fenced block (```` ``` ```` or ```` ```json ````); with
//!    nested or repeated fences, the first block that decodes and validates
//!    is used
//! 2. the whole text, when no fenced block decodes
//!
//! If nothing decodes, the failure is parse-class. Once something decodes,
//! any shape or invariant violation is validation-class, reported for the
//! first decoded block. Malformed JSON is never repaired.

use mealwise_core::errors::{AppError, ErrorCode};
use mealwise_core::models::ProgramGenerationResult;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

const FENCE: &str = "```";

/// Class of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseFailureKind {
    /// No structured data could be decoded
    Parse,
    /// Structured data decoded but violated the program schema
    Validation,
}

/// Failure to turn model output into a program set
#[derive(Debug, Clone, Error)]
pub enum ProgramParseError {
    /// Neither a fenced block nor the whole text decoded as JSON
    #[error("model response is not valid JSON: {reason}")]
    Parse {
        /// Original response text
        raw_text: String,
        /// Decoder message
        reason: String,
    },
    /// Decoded JSON violated the program schema
    #[error("model response does not match the diet program schema: {reason}")]
    Validation {
        /// Original response text
        raw_text: String,
        /// First violated rule
        reason: String,
    },
}

impl ProgramParseError {
    /// Failure class
    #[must_use]
    pub const fn kind(&self) -> ParseFailureKind {
        match self {
            Self::Parse { .. } => ParseFailureKind::Parse,
            Self::Validation { .. } => ParseFailureKind::Validation,
        }
    }

    /// Original response text
    #[must_use]
    pub fn raw_text(&self) -> &str {
        match self {
            Self::Parse { raw_text, .. } | Self::Validation { raw_text, .. } => raw_text,
        }
    }

    /// Why parsing failed
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Parse { reason, .. } | Self::Validation { reason, .. } => reason,
        }
    }
}

impl From<ProgramParseError> for AppError {
    fn from(error: ProgramParseError) -> Self {
        let code = match error.kind() {
            ParseFailureKind::Parse => ErrorCode::GenerationParseFailed,
            ParseFailureKind::Validation => ErrorCode::GenerationSchemaInvalid,
        };
        let details = json!({
            "kind": error.kind(),
            "reason": error.reason(),
            "rawText": error.raw_text(),
        });
        Self::new(code, error.to_string()).with_details(details)
    }
}

/// Parse and validate a model response
///
/// # Errors
///
/// Returns [`ProgramParseError::Parse`] when no JSON can be decoded and
/// [`ProgramParseError::Validation`] when decoded JSON violates the schema.
pub fn parse_program_response(raw_text: &str) -> Result<ProgramGenerationResult, ProgramParseError> {
    let validation = |reason| ProgramParseError::Validation {
        raw_text: raw_text.to_owned(),
        reason,
    };

    let mut first_failure = None;
    let decoded = fenced_blocks(raw_text)
        .filter_map(|block| serde_json::from_str::<Value>(block).ok());
    for value in decoded {
        match validated(value) {
            Ok(result) => return Ok(result),
            Err(reason) => {
                first_failure.get_or_insert(reason);
            }
        }
    }
    if let Some(reason) = first_failure {
        return Err(validation(reason));
    }

    let value: Value = serde_json::from_str(raw_text.trim()).map_err(|e| ProgramParseError::Parse {
        raw_text: raw_text.to_owned(),
        reason: e.to_string(),
    })?;
    validated(value).map_err(validation)
}

fn validated(value: Value) -> Result<ProgramGenerationResult, String> {
    let result: ProgramGenerationResult =
        serde_json::from_value(value).map_err(|e| e.to_string())?;
    result.validate()?;
    Ok(result)
}

/// Contents between consecutive fences, language tag stripped
fn fenced_blocks(text: &str) -> impl Iterator<Item = &str> {
    let positions: Vec<usize> = text.match_indices(FENCE).map(|(i, _)| i).collect();
    (1..positions.len()).map(move |n| {
        let inner = &text[positions[n - 1] + FENCE.len()..positions[n]];
        strip_language_tag(inner).trim()
    })
}

fn strip_language_tag(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(block.len());
    &block[tag_len..]
}
