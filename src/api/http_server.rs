// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::classify::classify_handler;
use super::handlers::{health_handler, info_handler};
use crate::classifier::ModelManager;
use crate::config::{ServerConfig, ServiceConfig};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub model_manager: Arc<ModelManager>,
}

impl AppState {
    pub fn new(config: ServiceConfig, model_manager: ModelManager) -> Self {
        Self {
            config: Arc::new(config),
            model_manager: Arc::new(model_manager),
        }
    }

    /// Default configuration with no model loaded
    pub fn new_for_test() -> Self {
        let config = ServiceConfig::default();
        let manager = ModelManager::unloaded(config.model.class_names.clone());
        Self::new(config, manager)
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server);
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/api/classify", post(classify_handler))
        .route("/api/health", get(health_handler))
        .route("/api/info", get(info_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Bind and serve until Ctrl-C
pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", listener.local_addr()?);
    info!("Available endpoints:");
    info!("- POST /api/classify - Classify waste image");
    info!("- GET /api/health - Health check");
    info!("- GET /api/info - Model information");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
