// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classifier model manager
//!
//! Holds the process-wide classifier that is loaded once at startup and
//! shared read-only across requests. A missing or broken model file is not
//! fatal: the service keeps answering with `model_loaded: false`.

use std::path::Path;
use std::sync::Arc;

use super::{OnnxWasteClassifier, WasteClassifier};
use crate::config::ModelConfig;

pub struct ModelManager {
    classifier: Option<Arc<dyn WasteClassifier>>,
    class_names: Vec<String>,
}

impl std::fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelManager")
            .field("loaded", &self.is_loaded())
            .field("class_names", &self.class_names)
            .finish()
    }
}

impl ModelManager {
    /// Load the ONNX classifier described by `config`
    ///
    /// Load failures are logged and leave the manager unloaded.
    pub fn load(config: &ModelConfig) -> Self {
        let path = Path::new(&config.path);

        match OnnxWasteClassifier::new(
            path,
            config.class_names.clone(),
            config.input_size,
            config.channel_order,
            config.intra_threads,
        ) {
            Ok(model) => {
                tracing::info!("✅ Classifier model loaded from {}", config.path);
                Self::with_classifier(Arc::new(model))
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to load classifier from {}: {:#}", config.path, e);
                Self::unloaded(config.class_names.clone())
            }
        }
    }

    pub fn with_classifier(classifier: Arc<dyn WasteClassifier>) -> Self {
        let class_names = classifier.class_names().to_vec();
        Self {
            classifier: Some(classifier),
            class_names,
        }
    }

    /// Manager without a model; still reports the configured classes
    pub fn unloaded(class_names: Vec<String>) -> Self {
        Self {
            classifier: None,
            class_names,
        }
    }

    pub fn classifier(&self) -> Option<Arc<dyn WasteClassifier>> {
        self.classifier.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }
}
