// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use std::{env, path::Path};
use tracing::{info, warn};
use waste_classifier_node::{
    api::{start_server, AppState},
    classifier::ModelManager,
    cli::Args,
    version,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    info!("🚀 Starting {}", version::get_version_string());
    info!("📦 BUILD VERSION: {}", version::VERSION);
    info!("   Features: {}", version::FEATURES.join(", "));

    let config = args.resolve_config()?;
    let addr = config.listen_addr()?;

    // Make sure the models directory exists so operators know where to drop the file
    if let Some(dir) = Path::new(&config.model.path).parent() {
        if !dir.as_os_str().is_empty() {
            if let Err(e) = tokio::fs::create_dir_all(dir).await {
                warn!("Could not create model directory {}: {}", dir.display(), e);
            }
        }
    }

    info!("🧠 Loading classifier from {}", config.model.path);
    let model_config = config.model.clone();
    let model_manager =
        tokio::task::spawn_blocking(move || ModelManager::load(&model_config)).await?;

    if model_manager.is_loaded() {
        info!("✅ Classifier ready");
    } else {
        warn!("⚠️ Running without a classifier; /api/classify will report 'Model not loaded'");
    }
    info!("   Classes: {}", model_manager.class_names().join(", "));
    info!(
        "   Minimum object area: {} px",
        config.detection.min_object_area
    );

    let state = AppState::new(config, model_manager);
    start_server(state, addr).await
}
