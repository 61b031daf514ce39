// ABOUTME: Diet program generation pipeline and the personalized plan generator
// ABOUTME: Prompt construction, defensive response parsing, orchestration, and fallback sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Program Generation
//!
//! Data flow: (goal, profile, answers) → [`build_program_prompt`] → prompt →
//! [`crate::llm::LlmProvider`] → raw text → [`parse_program_response`] →
//! validated [`mealwise_core::models::ProgramGenerationResult`].
//!
//! [`GenerationOrchestrator`] composes those steps and applies the configured
//! [`crate::config::GenerationMode`]. [`PlanGenerator`] serves the simpler
//! free-text plan.

/// Canned program set used in fallback mode
pub mod fallback;
/// Goal keys and their display labels
pub mod goals;
/// End-to-end program generation
pub mod orchestrator;
/// Model response extraction and validation
pub mod parser;
/// Free-text personalized plan
pub mod plan;
/// Deterministic prompt construction
pub mod prompt;

pub use fallback::fallback_programs;
pub use orchestrator::{GenerationOrchestrator, GenerationSettings};
pub use parser::{parse_program_response, ParseFailureKind, ProgramParseError};
pub use plan::PlanGenerator;
pub use prompt::build_program_prompt;
