// ABOUTME: Integration tests for the calorie estimation route
// ABOUTME: Covers the photo pipeline, unconfigured lookups, upload validation, and cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_resources, uploads_left, TestSetup};
use helpers::axum_test::{AxumTestRequest, MultipartPart};
use helpers::collaborators::ScriptedDetector;
use mealwise_server::errors::ErrorCode;
use mealwise_server::external::{MockAnswer, MockNutritionLookup};
use mealwise_server::server::build_router;
use serde_json::{json, Value};
use std::sync::Arc;

const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

#[tokio::test]
async fn test_placeholder_labels_are_resolved_in_order() {
    let lookup = Arc::new(
        MockNutritionLookup::new()
            .with_answer("rice", MockAnswer::Calories(205.6))
            .with_answer("chicken", MockAnswer::Calories(239.4))
            .with_answer("salad", MockAnswer::Fail("upstream 500".to_owned())),
    );
    let (resources, upload_dir) = create_test_resources(TestSetup {
        lookup: lookup.clone(),
        ..TestSetup::default()
    });

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::image(FAKE_JPEG)])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["totalCalories"], 206 + 239);
    assert_eq!(
        body["items"],
        json!([
            {"label": "rice", "calories": 206},
            {"label": "chicken", "calories": 239},
            {"label": "salad", "calories": null, "error": "Nutrition lookup failed"}
        ])
    );
    assert!(body.get("warning").is_none());
    assert_eq!(lookup.calls().len(), 3);
    assert_eq!(uploads_left(upload_dir.path()), 0);
}

#[tokio::test]
async fn test_unconfigured_lookup_short_circuits_with_warning() {
    let lookup = Arc::new(MockNutritionLookup::unconfigured());
    let (resources, _upload_dir) = create_test_resources(TestSetup {
        lookup: lookup.clone(),
        ..TestSetup::default()
    });

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::image(FAKE_JPEG)])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["totalCalories"], Value::Null);
    assert_eq!(body["items"][0], json!({"label": "rice", "calories": null}));
    assert_eq!(body["items"][1]["label"], "chicken");
    assert_eq!(body["items"][2]["label"], "salad");
    assert_eq!(body["warning"], "Nutrition lookup keys not configured");
    assert!(lookup.calls().is_empty());
}

#[tokio::test]
async fn test_labels_are_sanitized_before_lookup_but_reported_verbatim() {
    let lookup = Arc::new(
        MockNutritionLookup::new().with_answer("fried rice", MockAnswer::Calories(333.0)),
    );
    let (resources, _upload_dir) = create_test_resources(TestSetup {
        lookup: lookup.clone(),
        detector: Arc::new(ScriptedDetector::labels(&["  fried   rice!", "%%"])),
        ..TestSetup::default()
    });

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::image(FAKE_JPEG)])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(lookup.calls(), vec!["fried rice".to_owned()]);
    assert_eq!(body["items"][0]["label"], "  fried   rice!");
    assert_eq!(body["items"][0]["calories"], 333);
    assert_eq!(body["items"][1], json!({"label": "%%", "calories": null}));
    assert_eq!(body["totalCalories"], 333);
}

#[tokio::test]
async fn test_no_detected_labels_is_an_empty_estimate() {
    let (resources, _upload_dir) = create_test_resources(TestSetup {
        detector: Arc::new(ScriptedDetector::labels(&[])),
        ..TestSetup::default()
    });

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::image(FAKE_JPEG)])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body, json!({"totalCalories": 0, "items": []}));
}

#[tokio::test]
async fn test_missing_image_field_is_rejected() {
    let (resources, upload_dir) = create_test_resources(TestSetup::default());

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::text("note", b"lunch")])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("image"));
    assert_eq!(uploads_left(upload_dir.path()), 0);
}

#[tokio::test]
async fn test_non_multipart_body_is_invalid_input() {
    let (resources, _upload_dir) = create_test_resources(TestSetup::default());

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .json(&json!({"image": "base64?"}))
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_empty_image_is_invalid_input() {
    let (resources, _upload_dir) = create_test_resources(TestSetup::default());

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::image(&[])])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_image_over_upload_limit_is_rejected() {
    let (resources, upload_dir) = create_test_resources(TestSetup {
        max_upload_bytes: Some(8),
        ..TestSetup::default()
    });

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::image(&[0u8; 32])])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .json();

    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(uploads_left(upload_dir.path()), 0);
}

#[tokio::test]
async fn test_detector_failure_fails_request_and_cleans_up() {
    let detector = Arc::new(ScriptedDetector::failing(
        ErrorCode::ExternalServiceUnavailable,
    ));
    let lookup = Arc::new(MockNutritionLookup::new());
    let (resources, upload_dir) = create_test_resources(TestSetup {
        lookup: lookup.clone(),
        detector: detector.clone(),
        ..TestSetup::default()
    });

    let body: Value = AxumTestRequest::post("/estimate-calories")
        .multipart(&[MultipartPart::image(FAKE_JPEG)])
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .json();

    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_UNAVAILABLE");
    let seen = detector.seen();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].1, "upload must exist while the detector runs");
    assert!(!seen[0].0.exists());
    assert_eq!(uploads_left(upload_dir.path()), 0);
    assert!(lookup.calls().is_empty());
}
