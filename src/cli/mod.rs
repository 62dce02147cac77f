// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ChannelOrder, ServiceConfig};

/// Waste Classifier Node
///
/// Every flag can also be set through its `WASTE_*` environment variable.
#[derive(Parser, Debug, Default)]
#[command(name = "waste-classifier-node")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "HTTP service classifying photos of waste", long_about = None)]
pub struct Args {
    /// TOML configuration file
    #[arg(long, env = "WASTE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:5000
    #[arg(long, env = "WASTE_LISTEN_ADDR", value_name = "ADDR")]
    pub listen_addr: Option<String>,

    /// Path to the ONNX classifier
    #[arg(long, env = "WASTE_MODEL_PATH", value_name = "FILE")]
    pub model_path: Option<String>,

    /// Channel order fed to the network (rgb or bgr)
    #[arg(long, env = "WASTE_CHANNEL_ORDER", value_name = "ORDER")]
    pub channel_order: Option<ChannelOrder>,

    /// Minimum bounding-box area (pixels) for a counted object
    #[arg(long, env = "WASTE_MIN_OBJECT_AREA", value_name = "PIXELS")]
    pub min_object_area: Option<u32>,
}

impl Args {
    /// Resolve the effective configuration: defaults, then file, then flags
    pub fn resolve_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(addr) = &self.listen_addr {
            config.server.listen_addr = addr.clone();
        }
        if let Some(path) = &self.model_path {
            config.model.path = path.clone();
        }
        if let Some(order) = self.channel_order {
            config.model.channel_order = order;
        }
        if let Some(area) = self.min_object_area {
            config.detection.min_object_area = area;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}
