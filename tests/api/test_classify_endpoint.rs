// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Classify endpoint tests for POST /api/classify
//!
//! The router is driven end to end with `tower::ServiceExt::oneshot` and a
//! fixed in-process classifier standing in for the ONNX model.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use waste_classifier_node::{
    api::{
        classify::{
            handler::{CLASSIFICATION_FAILED_LABEL, MODEL_NOT_LOADED_LABEL},
            ClassifyRequest,
        },
        create_app, AppState,
    },
    classifier::ModelManager,
    config::ServiceConfig,
};

use crate::common::*;

fn classify_body(image: &str) -> String {
    serde_json::to_string(&ClassifyRequest::from_image(image)).unwrap()
}

#[tokio::test]
async fn test_classify_returns_full_classification() {
    let app = app_with_classifier(Arc::new(FixedClassifier::new("Ewaste", 0.9)));

    let (status, body) = post_json(app, "/api/classify", classify_body(TINY_PNG_BASE64)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let classification = &body["classification"];
    assert_eq!(classification["predicted_class"], "Ewaste");
    assert_eq!(classification["waste_type"], "e-waste");
    assert_eq!(classification["points"], 22);
    assert_eq!(classification["object_count"], 0);

    let confidence = classification["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    assert!((confidence - 0.9).abs() < 1e-6);

    let fields = classification.as_object().unwrap();
    assert_eq!(fields.len(), 5, "unexpected fields: {:?}", fields.keys());
}

#[tokio::test]
async fn test_classify_counts_objects() {
    let app = app_with_classifier(Arc::new(FixedClassifier::new("Biodegradable", 1.0)));
    let image = encode_png_base64(&two_objects_image());

    let (status, body) = post_json(app, "/api/classify", classify_body(&image)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"]["waste_type"], "organic");
    assert_eq!(body["classification"]["points"], 10);
    assert_eq!(body["classification"]["object_count"], 2);
}

#[tokio::test]
async fn test_classify_ignores_small_objects() {
    let app = app_without_model();
    let image = encode_png_base64(&small_object_image());

    let (status, body) = post_json(app, "/api/classify", classify_body(&image)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"]["object_count"], 0);
}

#[tokio::test]
async fn test_classify_accepts_data_url() {
    let app = app_with_classifier(Arc::new(FixedClassifier::new(
        "Pharmaceutical and Biomedical Waste",
        0.8,
    )));
    let data_url = format!("data:image/png;base64,{}", TINY_PNG_BASE64);

    let (status, body) = post_json(app, "/api/classify", classify_body(&data_url)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"]["waste_type"], "hazardous");
    assert_eq!(body["classification"]["points"], 24);
}

#[tokio::test]
async fn test_classify_accepts_gif() {
    let app = app_with_classifier(Arc::new(FixedClassifier::new("Non Biodegradable", 0.5)));

    let (status, body) = post_json(app, "/api/classify", classify_body(TINY_GIF_BASE64)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"]["waste_type"], "plastic");
    assert_eq!(body["classification"]["points"], 7);
}

#[tokio::test]
async fn test_classify_without_model_degrades() {
    let (status, body) = post_json(
        app_without_model(),
        "/api/classify",
        classify_body(TINY_PNG_BASE64),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["classification"]["predicted_class"], MODEL_NOT_LOADED_LABEL);
    assert_eq!(body["classification"]["waste_type"], "other");
    assert_eq!(body["classification"]["confidence"], 0.0);
    assert_eq!(body["classification"]["points"], 0);
}

#[tokio::test]
async fn test_classify_inference_failure_degrades() {
    let classifier = BrokenClassifier {
        classes: vec!["Biodegradable".to_string()],
    };
    let app = app_with_classifier(Arc::new(classifier));

    let (status, body) = post_json(app, "/api/classify", classify_body(TINY_PNG_BASE64)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["classification"]["predicted_class"],
        CLASSIFICATION_FAILED_LABEL
    );
    assert_eq!(body["classification"]["points"], 0);
}

#[tokio::test]
async fn test_classify_missing_image() {
    let (status, body) = post_json(app_without_model(), "/api/classify", "{}".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No image data provided" }));
}

#[tokio::test]
async fn test_classify_null_image() {
    let (status, body) = post_json(
        app_without_model(),
        "/api/classify",
        r#"{"image": null}"#.to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image data provided");
}

#[tokio::test]
async fn test_classify_non_json_body() {
    let (status, body) = post_json(
        app_without_model(),
        "/api/classify",
        "this is not json".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image data provided");
}

#[tokio::test]
async fn test_classify_missing_content_type() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/classify")
                .body(Body::from(classify_body(TINY_PNG_BASE64)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "No image data provided");
}

#[tokio::test]
async fn test_classify_corrupt_base64() {
    let (status, body) = post_json(
        app_without_model(),
        "/api/classify",
        classify_body("not-base64!!"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid image data" }));
}

#[tokio::test]
async fn test_classify_base64_of_non_image() {
    // "hello world" is valid base64 but not a picture
    let (status, body) = post_json(
        app_without_model(),
        "/api/classify",
        classify_body("aGVsbG8gd29ybGQ="),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid image data");
}

#[tokio::test]
async fn test_classify_non_string_image() {
    let (status, body) = post_json(
        app_without_model(),
        "/api/classify",
        r#"{"image": 12345}"#.to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid image data");
}

#[tokio::test]
async fn test_classify_rejects_get() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .uri("/api/classify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_classify_accepts_line_wrapped_base64() {
    let app = app_with_classifier(Arc::new(FixedClassifier::new("Biodegradable", 1.0)));
    let image = encode_png_base64(&two_objects_image());
    let wrapped = image
        .as_bytes()
        .chunks(76)
        .map(|line| std::str::from_utf8(line).unwrap())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(wrapped.contains('\n'));

    let (status, body) = post_json(app, "/api/classify", classify_body(&wrapped)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"]["object_count"], 2);
}

#[tokio::test]
async fn test_classify_oversized_body_is_invalid_image() {
    let mut config = ServiceConfig::default();
    config.server.max_body_bytes = 1024;
    let app = create_app(AppState::new(
        config,
        ModelManager::unloaded(vec!["Biodegradable".to_string()]),
    ));

    let (status, body) = post_json(app, "/api/classify", classify_body(&"A".repeat(4096))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid image data" }));
}
