// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{create_app, start_server, AppState};
pub use classifier::{ModelManager, OnnxWasteClassifier, Prediction, WasteClassifier, WasteType};
pub use config::{ChannelOrder, ServiceConfig};
