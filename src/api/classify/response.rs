// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classify response types

use serde::{Deserialize, Serialize};

use crate::classifier::WasteType;

/// Classification record for a single image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Model label, or a sentinel when the model could not run
    pub predicted_class: String,
    pub waste_type: WasteType,
    /// Probability of `predicted_class` (0.0-1.0)
    pub confidence: f32,
    pub points: u32,
    pub object_count: usize,
}

/// Successful response from POST /api/classify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub classification: Classification,
}

impl ClassifyResponse {
    pub fn new(classification: Classification) -> Self {
        Self {
            success: true,
            classification,
        }
    }
}
