// ABOUTME: Prompt texts for LLM interactions loaded at compile time
// ABOUTME: Diet program instructions, the required output schema, and the plan prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts live next to this module as plain files and are embedded with
//! `include_str!`, so they can be edited without Rust string escaping.

/// System instructions for diet program generation
pub const DIET_PROGRAMS_SYSTEM_PROMPT: &str = include_str!("diet_programs_system.md");

/// Required output schema for diet program generation, embedded verbatim in prompts
pub const DIET_PROGRAM_SCHEMA: &str = include_str!("diet_program_schema.json");

/// System instructions for the free-text personalized plan
pub const NUTRITION_PLAN_SYSTEM_PROMPT: &str = include_str!("nutrition_plan_system.md");
