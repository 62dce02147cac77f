// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health and model info endpoint tests

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use waste_classifier_node::api::{HealthResponse, ModelInfoResponse};

use crate::common::*;

const DEFAULT_CLASSES: [&str; 5] = [
    "Biodegradable",
    "Non Biodegradable",
    "Ewaste",
    "Pharmaceutical and Biomedical Waste",
    "hazardous",
];

#[tokio::test]
async fn test_health_without_model() {
    let (status, body) = get_json(app_without_model(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "model_loaded": false,
            "available_classes": DEFAULT_CLASSES,
        })
    );
}

#[tokio::test]
async fn test_health_with_model() {
    let app = app_with_classifier(Arc::new(FixedClassifier::new("Ewaste", 0.7)));
    let (status, body) = get_json(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
    assert_eq!(health.available_classes, DEFAULT_CLASSES);
}

#[tokio::test]
async fn test_health_reports_model_classes() {
    let classifier = BrokenClassifier {
        classes: vec!["glass".to_string(), "metal".to_string()],
    };
    let (_, body) = get_json(app_with_classifier(Arc::new(classifier)), "/api/health").await;

    assert_eq!(body["available_classes"], json!(["glass", "metal"]));
}

#[tokio::test]
async fn test_info_shape() {
    let (status, body) = get_json(app_without_model(), "/api/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_shape"], json!([224, 224, 3]));

    let info: ModelInfoResponse = serde_json::from_value(body).unwrap();
    assert_eq!(info.model_name, "Garbage Classification Model");
    assert_eq!(info.classes, DEFAULT_CLASSES);
    assert!(!info.description.is_empty());
}

#[tokio::test]
async fn test_info_is_stable_across_calls() {
    let (_, first) = get_json(app_without_model(), "/api/info").await;
    let (_, second) = get_json(app_without_model(), "/api/info").await;
    assert_eq!(first, second);
}
