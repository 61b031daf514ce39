// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-loaded ServerConfig and its collaborator sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Mealwise server

/// Environment and server configuration
pub mod environment;

pub use environment::{
    Environment, GenerationMode, LlmConfig, NutritionConfig, NutritionProviderKind,
    NutritionixCredentials, ReasoningEffort, ServerConfig, UploadConfig, VisionConfig,
};
