// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classify endpoint handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::request::ClassifyRequest;
use super::response::{Classification, ClassifyResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::classifier::{calculate_points, WasteClassifier, WasteType};
use crate::vision::{count_objects, decode_base64_image};

/// Reported as `predicted_class` when no model is loaded
pub const MODEL_NOT_LOADED_LABEL: &str = "Model not loaded";

/// Reported as `predicted_class` when inference fails
pub const CLASSIFICATION_FAILED_LABEL: &str = "Error in classification";

/// POST /api/classify - Classify a photo of waste
///
/// # Request
/// - `image`: Base64-encoded image data or a `data:` URL (required)
///
/// # Response
/// - `success`: always `true`
/// - `classification.predicted_class`: model label
/// - `classification.waste_type`: organic, plastic, e-waste, hazardous or other
/// - `classification.confidence`: 0.0-1.0
/// - `classification.points`: base points for the waste type scaled by confidence
/// - `classification.object_count`: foreground objects found by thresholding
///
/// # Errors
/// - 400 Bad Request: missing body/image, body over the size limit, or the
///   image cannot be decoded
/// - 500 Internal Server Error: the processing task failed unexpectedly
///
/// A missing model or failed inference does not fail the request; the
/// classification then carries a sentinel label and zero confidence.
pub async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_to_error)?;

    let image = request
        .validate()
        .map_err(|e| {
            warn!("Classify validation failed: {}", e);
            e
        })?
        .to_string();

    let classifier = state.model_manager.classifier();
    let min_object_area = state.config.detection.min_object_area;
    let started = Instant::now();

    let classification = tokio::task::spawn_blocking(move || {
        classify_image_payload(&image, classifier.as_deref(), min_object_area)
    })
    .await
    .map_err(|e| {
        error!("Classification task failed: {}", e);
        ApiError::InternalError
    })??;

    info!(
        "Classified as {} ({}, {:.2} confidence, {} points, {} objects) in {}ms",
        classification.predicted_class,
        classification.waste_type,
        classification.confidence,
        classification.points,
        classification.object_count,
        started.elapsed().as_millis()
    );

    Ok(Json(ClassifyResponse::new(classification)))
}

/// Map a body extraction failure onto the client-facing error
///
/// An upload over the body limit did carry an image, just not a usable one.
fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Classify body exceeds size limit: {}", rejection.body_text());
        return ApiError::InvalidImage;
    }

    warn!("Rejected classify body: {}", rejection.body_text());
    ApiError::MissingImage
}

/// Decode, classify, map and count a single image payload
///
/// Only decoding can fail; classifier problems degrade to a sentinel label.
pub fn classify_image_payload(
    image: &str,
    classifier: Option<&dyn WasteClassifier>,
    min_object_area: u32,
) -> Result<Classification, ApiError> {
    let (image, image_info) = decode_base64_image(image).map_err(|e| {
        warn!("Failed to decode image: {}", e);
        ApiError::InvalidImage
    })?;

    debug!(
        "Decoded image: {}x{}, {} bytes",
        image_info.width, image_info.height, image_info.size_bytes
    );

    let (predicted_class, confidence) = match classifier {
        None => {
            warn!("Classifier not loaded");
            (MODEL_NOT_LOADED_LABEL.to_string(), 0.0)
        }
        Some(model) => match model.classify(&image) {
            Ok(prediction) => (prediction.label, prediction.confidence),
            Err(e) => {
                error!("Classification error: {:#}", e);
                (CLASSIFICATION_FAILED_LABEL.to_string(), 0.0)
            }
        },
    };

    let waste_type = WasteType::from_label(&predicted_class);
    let points = calculate_points(waste_type, confidence);
    let object_count = count_objects(&image, min_object_area);

    Ok(Classification {
        predicted_class,
        waste_type,
        confidence,
        points,
        object_count,
    })
}
