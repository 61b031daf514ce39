// ABOUTME: Route module organization for Mealwise HTTP endpoints
// ABOUTME: One route struct per domain plus shared request-rejection mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Mealwise server
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the pipelines held by [`crate::resources::ServerResources`].

/// Calorie estimation routes
pub mod calories;
/// Health check and readiness routes
pub mod health;
/// Personalized plan routes
pub mod plans;
/// Diet program generation routes
pub mod programs;

pub use calories::CalorieRoutes;
pub use health::HealthRoutes;
pub use plans::PlanRoutes;
pub use programs::{GenerateProgramsRequest, ProgramRoutes};

use axum::extract::rejection::JsonRejection;
use http::StatusCode;
use mealwise_core::errors::{AppError, ErrorCode};

/// Convert a JSON body rejection into a client error carrying the decoder's message
pub(crate) fn json_rejection(rejection: &JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::PayloadTooLarge, rejection.body_text())
    } else {
        AppError::invalid_input(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}
