// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub available_classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model_name: String,
    pub classes: Vec<String>,
    /// (height, width, channels)
    pub input_shape: [u32; 3],
    pub description: String,
}

/// GET /api/health
///
/// Always reports `healthy`; `model_loaded` tells whether classification is live.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model_manager.is_loaded(),
        available_classes: state.model_manager.class_names().to_vec(),
    })
}

/// GET /api/info - static model metadata
pub async fn info_handler(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let model = &state.config.model;

    Json(ModelInfoResponse {
        model_name: model.name.clone(),
        classes: state.model_manager.class_names().to_vec(),
        input_shape: model.input_shape(),
        description: model.description.clone(),
    })
}
