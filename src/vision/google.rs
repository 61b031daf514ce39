// ABOUTME: Google Cloud Vision label detection client
// ABOUTME: Sends the image as base64 to images:annotate and keeps the ranked label descriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::LabelDetector;
use crate::external::{status_error, transport_error};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use mealwise_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "Google Vision";

/// Google Vision client configuration
#[derive(Debug, Clone)]
pub struct GoogleVisionConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Labels kept per image
    pub max_labels: usize,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<VisionStatus>,
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct VisionStatus {
    #[serde(default)]
    message: String,
}

impl AnnotateResponse {
    fn into_labels(self, max_labels: usize) -> AppResult<Vec<String>> {
        let Some(first) = self.responses.into_iter().next() else {
            return Ok(Vec::new());
        };
        if let Some(status) = first.error {
            return Err(AppError::external_service(SERVICE, status.message));
        }
        Ok(first
            .label_annotations
            .into_iter()
            .map(|a| a.description.trim().to_owned())
            .filter(|d| !d.is_empty())
            .take(max_labels)
            .collect())
    }
}

/// Label detector backed by the Google Cloud Vision API
pub struct GoogleVisionDetector {
    config: GoogleVisionConfig,
    http_client: reqwest::Client,
}

impl GoogleVisionDetector {
    /// Create a new Vision client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: GoogleVisionConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl LabelDetector for GoogleVisionDetector {
    fn name(&self) -> &'static str {
        "google-vision"
    }

    async fn detect(&self, image_path: &Path) -> AppResult<Vec<String>> {
        let bytes = tokio::fs::read(image_path)
            .await
            .map_err(|e| AppError::storage(format!("Failed to read upload: {e}")))?;

        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(&bytes),
                },
                features: vec![Feature {
                    feature_type: "LABEL_DETECTION",
                    max_results: self.config.max_labels,
                }],
            }],
        };

        let url = format!(
            "{}/images:annotate",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(SERVICE, status, &text));
        }

        let parsed: AnnotateResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("JSON parse error: {e}"))
        })?;
        let labels = parsed.into_labels(self.config.max_labels)?;
        debug!(count = labels.len(), "Vision labels detected");
        Ok(labels)
    }
}
