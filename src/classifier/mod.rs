// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Waste classification
//!
//! Pretrained garbage classifier (ONNX Runtime, CPU) plus the static
//! taxonomy that turns its labels into waste types and points.

pub mod model_manager;
pub mod onnx_model;
pub mod preprocessing;
pub mod taxonomy;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

pub use model_manager::ModelManager;
pub use onnx_model::{scores_to_prediction, OnnxWasteClassifier};
pub use preprocessing::preprocess;
pub use taxonomy::{calculate_points, WasteType};

/// Top-1 result of a forward pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Index into the model's class list
    pub class_index: usize,
    /// Class label at `class_index`
    pub label: String,
    /// Probability of the label, within [0, 1]
    pub confidence: f32,
}

/// Image classifier producing one label per image
///
/// Implemented by `OnnxWasteClassifier`; the seam lets the HTTP layer be
/// exercised without model files.
pub trait WasteClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> anyhow::Result<Prediction>;

    /// Labels in model output order
    fn class_names(&self) -> &[String];
}
