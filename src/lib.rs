// ABOUTME: Main library entry point for the Mealwise nutrition API
// ABOUTME: Photo calorie estimation and language-model-backed diet program generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealwise Server
//!
//! A stateless HTTP service with two capabilities:
//!
//! - **Calorie estimation**: a meal photo is labelled by a vision backend and
//!   every label is resolved against a nutrition database concurrently, with
//!   per-label failure isolation.
//! - **Diet programs**: a goal, profile and questionnaire answers are rendered
//!   into a prompt, sent to a language model once, and the reply is decoded
//!   and validated into exactly three programs.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven configuration loaded once at startup
//! - **External / Vision / LLM**: collaborator clients behind async traits
//! - **Nutrition / Programs**: the two pipelines, independent of HTTP
//! - **Routes / Server**: thin axum handlers over shared resources
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealwise_server::config::ServerConfig;
//! use mealwise_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let port = config.http_port;
//!     let resources = Arc::new(ServerResources::from_config(config)?);
//!     mealwise_server::server::run(resources, port).await?;
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Nutrition lookup clients
pub mod external;

/// Language-model client abstraction and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Calorie estimation pipeline
pub mod nutrition;

/// Diet program and plan generation
pub mod programs;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Outbound value sanitization
pub mod security;

/// Router assembly and server lifecycle
pub mod server;

/// Temporary upload storage
pub mod uploads;

/// Food label detection
pub mod vision;

pub use mealwise_core::{constants, errors, models};
