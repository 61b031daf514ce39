// ABOUTME: Common test utilities for building server resources and routers
// ABOUTME: Wires scripted collaborators into ServerResources with a temporary upload directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use mealwise_server::config::{GenerationMode, ServerConfig};
use mealwise_server::external::{MockNutritionLookup, NutritionLookup};
use mealwise_server::llm::LlmProvider;
use mealwise_server::resources::ServerResources;
use mealwise_server::vision::{LabelDetector, PlaceholderDetector};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Collaborators for one test server
pub struct TestSetup {
    pub lookup: Arc<dyn NutritionLookup>,
    pub detector: Arc<dyn LabelDetector>,
    pub llm: Option<Arc<dyn LlmProvider>>,
    pub mode: GenerationMode,
    pub max_upload_bytes: Option<usize>,
}

impl Default for TestSetup {
    fn default() -> Self {
        Self {
            lookup: Arc::new(MockNutritionLookup::new()),
            detector: Arc::new(PlaceholderDetector),
            llm: None,
            mode: GenerationMode::Live,
            max_upload_bytes: None,
        }
    }
}

/// Configuration pointing uploads at `upload_dir`
pub fn test_config(upload_dir: &Path, setup: &TestSetup) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.uploads.directory = upload_dir.to_path_buf();
    if let Some(max) = setup.max_upload_bytes {
        config.uploads.max_bytes = max;
    }
    config.nutrition.timeout_secs = 2;
    config.generation_mode = setup.mode;
    config
}

/// Build shared resources; the returned directory must outlive the resources
pub fn create_test_resources(setup: TestSetup) -> (Arc<ServerResources>, TempDir) {
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
    let config = test_config(upload_dir.path(), &setup);
    let resources =
        ServerResources::with_collaborators(config, setup.lookup, setup.detector, setup.llm);
    (Arc::new(resources), upload_dir)
}

/// Number of files left in the upload directory
pub fn uploads_left(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(Iterator::count).unwrap_or(0)
}
