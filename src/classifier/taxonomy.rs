// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Waste-type taxonomy and points scoring

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse disposal bucket derived from the classifier label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteType {
    #[serde(rename = "organic")]
    Organic,
    #[serde(rename = "plastic")]
    Plastic,
    #[serde(rename = "e-waste")]
    EWaste,
    #[serde(rename = "hazardous")]
    Hazardous,
    #[serde(rename = "other")]
    Other,
}

impl WasteType {
    /// Map a classifier label onto its waste type; unknown labels are `Other`
    pub fn from_label(label: &str) -> Self {
        match label {
            "Biodegradable" => WasteType::Organic,
            "Non Biodegradable" => WasteType::Plastic,
            "Ewaste" => WasteType::EWaste,
            "Pharmaceutical and Biomedical Waste" | "hazardous" => WasteType::Hazardous,
            _ => WasteType::Other,
        }
    }

    pub fn base_points(&self) -> u32 {
        match self {
            WasteType::Organic => 10,
            WasteType::Plastic => 15,
            WasteType::EWaste => 25,
            WasteType::Hazardous => 30,
            WasteType::Other => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Organic => "organic",
            WasteType::Plastic => "plastic",
            WasteType::EWaste => "e-waste",
            WasteType::Hazardous => "hazardous",
            WasteType::Other => "other",
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points awarded for a classification: base points scaled by confidence, truncated
pub fn calculate_points(waste_type: WasteType, confidence: f32) -> u32 {
    let confidence = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };

    (waste_type.base_points() as f32 * confidence) as u32
}
