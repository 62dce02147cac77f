// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Garbage Classifier Wrapper
//!
//! Wraps ONNX Runtime for the MobileNetV2-based garbage classification
//! network exported from Keras.
//!
//! Features:
//! - ONNX model loading from disk (CPU execution provider)
//! - Output-size validation against the configured class list
//! - Resize / normalize preprocessing (NHWC, [0, 1])
//! - Arg-max over class probabilities, with softmax for raw logits

use anyhow::{Context, Result};
use image::DynamicImage;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use ndarray::Array4;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::preprocessing::preprocess;
use super::{Prediction, WasteClassifier};
use crate::config::ChannelOrder;

/// Tolerance when deciding whether scores already form a distribution
const PROBABILITY_SUM_TOLERANCE: f32 = 1e-3;

/// ONNX-based waste classifier
///
/// # Thread Safety
/// The session is wrapped in `Arc<Mutex>` since `Session::run` needs `&mut`.
#[derive(Clone)]
pub struct OnnxWasteClassifier {
    session: Arc<Mutex<Session>>,
    input_name: String,
    class_names: Vec<String>,
    input_size: u32,
    channel_order: ChannelOrder,
}

impl std::fmt::Debug for OnnxWasteClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxWasteClassifier")
            .field("input_name", &self.input_name)
            .field("class_names", &self.class_names)
            .field("input_size", &self.input_size)
            .field("channel_order", &self.channel_order)
            .finish_non_exhaustive()
    }
}

impl OnnxWasteClassifier {
    /// Load the classifier from an ONNX file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found or invalid
    /// - The class list is empty
    /// - ONNX Runtime initialization fails
    /// - The model does not emit one score per class
    pub fn new<P: AsRef<Path>>(
        model_path: P,
        class_names: Vec<String>,
        input_size: u32,
        channel_order: ChannelOrder,
        intra_threads: usize,
    ) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Classifier model not found: {}", model_path.display());
        }
        if class_names.is_empty() {
            anyhow::bail!("Classifier requires at least one class name");
        }

        info!("Loading garbage classifier from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(intra_threads.max(1))
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load classifier model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .context("Classifier model declares no inputs")?;

        debug!("Classifier input: {}", input_name);

        let classifier = Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            class_names,
            input_size,
            channel_order,
        };

        // Validation run: one score per configured class
        let probe = Array4::<f32>::zeros((1, input_size as usize, input_size as usize, 3));
        let scores = classifier
            .run(probe)
            .context("Classifier validation inference failed")?;
        if scores.len() != classifier.class_names.len() {
            anyhow::bail!(
                "Model outputs {} scores but {} class names are configured",
                scores.len(),
                classifier.class_names.len()
            );
        }

        info!(
            "✅ Garbage classifier loaded ({} classes, {}x{} input)",
            classifier.class_names.len(),
            input_size,
            input_size
        );

        Ok(classifier)
    }

    /// Forward pass over a preprocessed [1, H, W, 3] tensor, returning raw scores
    fn run(&self, input: Array4<f32>) -> Result<Vec<f32>> {
        let input_value = Value::from_array(input).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Classifier session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Classifier inference failed")?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let scores = output.iter().copied().collect();
        Ok(scores)
    }
}

impl WasteClassifier for OnnxWasteClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Prediction> {
        let input = preprocess(image, self.input_size, self.channel_order);
        let scores = self.run(input)?;
        scores_to_prediction(&scores, &self.class_names)
    }

    fn class_names(&self) -> &[String] {
        &self.class_names
    }
}

/// Turn raw output scores into the top prediction
///
/// Scores that are not already a probability distribution are passed
/// through softmax so the reported confidence always lies in [0, 1].
pub fn scores_to_prediction(scores: &[f32], class_names: &[String]) -> Result<Prediction> {
    if scores.len() != class_names.len() {
        anyhow::bail!(
            "Expected {} scores, model produced {}",
            class_names.len(),
            scores.len()
        );
    }

    let probabilities = if is_distribution(scores) {
        scores.to_vec()
    } else {
        softmax(scores)
    };

    let (class_index, confidence) = probabilities
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
        .context("Model produced no finite scores")?;

    Ok(Prediction {
        class_index,
        label: class_names[class_index].clone(),
        confidence: confidence.clamp(0.0, 1.0),
    })
}

fn is_distribution(scores: &[f32]) -> bool {
    let in_range = scores.iter().all(|s| (0.0..=1.0).contains(s));
    let sum: f32 = scores.iter().sum();
    in_range && (sum - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);

    let exps: Vec<f32> = scores
        .iter()
        .map(|s| if s.is_finite() { (s - max).exp() } else { 0.0 })
        .collect();
    let sum: f32 = exps.iter().sum();

    if sum <= 0.0 || !sum.is_finite() {
        return vec![f32::NAN; scores.len()];
    }

    exps.iter().map(|e| e / sum).collect()
}
