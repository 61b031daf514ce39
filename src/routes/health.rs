// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and a readiness report of which collaborators are configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` is a liveness check. `/ready` always answers 200 because missing
//! credentials are a handled state; it reports which paths are degraded.

use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .route("/ready", get(Self::ready))
            .with_state(resources)
    }

    async fn health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let aggregator = resources.estimator.aggregator();
        Json(json!({
            "status": "ready",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "nutrition": {
                "provider": aggregator.provider_name(),
                "configured": aggregator.is_configured()
            },
            "vision": {
                "detector": resources.estimator.detector_name()
            },
            "generation": {
                "mode": resources.orchestrator.mode().to_string(),
                "llmConfigured": resources.orchestrator.has_provider()
            }
        }))
    }
}
