// ABOUTME: Food label detection abstraction for meal photos
// ABOUTME: LabelDetector contract with Google Vision and placeholder implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Label Detection
//!
//! A [`LabelDetector`] turns an image on disk into an ordered, possibly empty
//! list of food labels. The order is the detector's ranking and is preserved
//! through nutrition aggregation; duplicates are allowed.
//!
//! Without a Vision API key the [`PlaceholderDetector`] answers with a fixed
//! label list so the rest of the pipeline stays exercisable.

mod google;

pub use google::{GoogleVisionConfig, GoogleVisionDetector};

use crate::config::VisionConfig;
use async_trait::async_trait;
use mealwise_core::errors::AppResult;
use std::path::Path;
use std::sync::Arc;

/// Labels returned by [`PlaceholderDetector`]
pub const PLACEHOLDER_LABELS: [&str; 3] = ["rice", "chicken", "salad"];

/// Contract for food label detection
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detector identifier used in logs and readiness output
    fn name(&self) -> &'static str;

    /// Detect food labels in the image stored at `image_path`
    async fn detect(&self, image_path: &Path) -> AppResult<Vec<String>>;
}

/// Fixed-answer detector used when no vision backend is configured
#[derive(Debug, Clone, Default)]
pub struct PlaceholderDetector;

#[async_trait]
impl LabelDetector for PlaceholderDetector {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn detect(&self, _image_path: &Path) -> AppResult<Vec<String>> {
        Ok(PLACEHOLDER_LABELS.iter().map(|l| (*l).to_owned()).collect())
    }
}

/// Build the configured label detector
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed
pub fn build_label_detector(config: &VisionConfig) -> AppResult<Arc<dyn LabelDetector>> {
    match &config.api_key {
        Some(api_key) => Ok(Arc::new(GoogleVisionDetector::new(GoogleVisionConfig {
            api_key: api_key.clone(),
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
            max_labels: config.max_labels,
        })?)),
        None => Ok(Arc::new(PlaceholderDetector)),
    }
}
