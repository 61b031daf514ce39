// ABOUTME: Calorie estimation route for uploaded meal photos
// ABOUTME: Reads the multipart image field, enforces the upload limit, and runs the estimator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use http::StatusCode;
use mealwise_core::errors::{AppError, AppResult};
use mealwise_core::models::CalorieEstimate;
use std::sync::Arc;
use tracing::info;

/// Multipart field carrying the photo
const IMAGE_FIELD: &str = "image";

/// Calorie estimation routes
pub struct CalorieRoutes;

impl CalorieRoutes {
    /// Create the calorie estimation route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/estimate-calories", post(Self::estimate_calories))
            .with_state(resources)
    }

    async fn estimate_calories(
        State(resources): State<Arc<ServerResources>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<CalorieEstimate>, AppError> {
        let multipart = multipart.map_err(|rejection| {
            AppError::invalid_input(format!("Expected a multipart upload: {}", rejection.body_text()))
        })?;
        let max_bytes = resources.config.uploads.max_bytes;
        let image = Self::read_image(multipart, max_bytes).await?;

        let estimate = resources.estimator.estimate(&image).await?;
        info!(
            items = estimate.items.len(),
            failures = estimate.failure_count(),
            total = ?estimate.total_calories,
            "Calorie estimate ready"
        );
        Ok(Json(estimate))
    }

    /// Find the image field, skipping any other parts
    async fn read_image(mut multipart: Multipart, max_bytes: usize) -> AppResult<Bytes> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, max_bytes))?
        {
            if field.name() != Some(IMAGE_FIELD) {
                continue;
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(&e, max_bytes))?;
            if data.is_empty() {
                return Err(AppError::invalid_input("Uploaded image is empty"));
            }
            if data.len() > max_bytes {
                return Err(AppError::payload_too_large(max_bytes));
            }
            return Ok(data);
        }
        Err(AppError::missing_field(IMAGE_FIELD))
    }
}

fn multipart_error(error: &MultipartError, max_bytes: usize) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(max_bytes)
    } else {
        AppError::invalid_input(format!("Invalid multipart body: {}", error.body_text()))
    }
}
