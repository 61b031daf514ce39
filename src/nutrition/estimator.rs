// ABOUTME: End-to-end calorie estimation for one uploaded photo
// ABOUTME: Stores the upload, detects labels, releases the file, then aggregates lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::CalorieAggregator;
use crate::uploads::TempUpload;
use crate::vision::LabelDetector;
use mealwise_core::errors::AppResult;
use mealwise_core::models::CalorieEstimate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Photo-to-estimate pipeline
#[derive(Clone)]
pub struct CalorieEstimator {
    detector: Arc<dyn LabelDetector>,
    aggregator: CalorieAggregator,
    upload_dir: PathBuf,
}

impl CalorieEstimator {
    /// Create an estimator storing uploads under `upload_dir`
    #[must_use]
    pub fn new(
        detector: Arc<dyn LabelDetector>,
        aggregator: CalorieAggregator,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            detector,
            aggregator,
            upload_dir,
        }
    }

    /// Label detector in use
    #[must_use]
    pub fn detector_name(&self) -> &'static str {
        self.detector.name()
    }

    /// Aggregator in use
    #[must_use]
    pub const fn aggregator(&self) -> &CalorieAggregator {
        &self.aggregator
    }

    /// Estimate the calories of the meal in `image`
    ///
    /// The stored upload is released as soon as detection returns, whether it
    /// succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload cannot be stored or label detection fails
    #[instrument(skip_all, fields(detector = self.detector.name(), bytes = image.len()))]
    pub async fn estimate(&self, image: &[u8]) -> AppResult<CalorieEstimate> {
        let upload = TempUpload::persist(&self.upload_dir, image).await?;
        let detected = self.detector.detect(upload.path()).await;
        if let Err(e) = upload.release().await {
            warn!(error = %e, "Upload cleanup failed");
        }

        let labels = detected?;
        info!(labels = labels.len(), "Food labels detected");
        Ok(self.aggregator.aggregate(labels).await)
    }
}
