// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Values are resolved in order: built-in defaults, an optional TOML file,
//! then CLI flags or their `WASTE_*` environment variables (see `crate::cli`).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::vision::DEFAULT_MIN_OBJECT_AREA;

/// Labels produced by the garbage classification network, in output order
pub const DEFAULT_CLASS_NAMES: [&str; 5] = [
    "Biodegradable",
    "Non Biodegradable",
    "Ewaste",
    "Pharmaceutical and Biomedical Waste",
    "hazardous",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Pixel channel order fed to the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

impl Default for ChannelOrder {
    fn default() -> Self {
        // The network was trained on OpenCV-loaded (BGR) arrays
        ChannelOrder::Bgr
    }
}

impl std::str::FromStr for ChannelOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rgb" => Ok(ChannelOrder::Rgb),
            "bgr" => Ok(ChannelOrder::Bgr),
            other => Err(ConfigError::Invalid {
                field: "model.channel_order".to_string(),
                message: format!("expected 'rgb' or 'bgr', got '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Upper bound on request bodies; base64 inflates images by ~4/3
    pub max_body_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            max_body_bytes: 16 * 1024 * 1024,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the exported ONNX classifier
    pub path: String,
    pub name: String,
    pub description: String,
    /// Square input edge in pixels
    pub input_size: u32,
    pub channel_order: ChannelOrder,
    pub intra_threads: usize,
    pub class_names: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "./models/garbage_classifier.onnx".to_string(),
            name: "Garbage Classification Model".to_string(),
            description: "MobileNetV2-based waste classification model".to_string(),
            input_size: 224,
            channel_order: ChannelOrder::default(),
            intra_threads: 4,
            class_names: DEFAULT_CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ModelConfig {
    /// Shape reported by `/api/info` (height, width, channels)
    pub fn input_shape(&self) -> [u32; 3] {
        [self.input_size, self.input_size, 3]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub min_object_area: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_object_area: DEFAULT_MIN_OBJECT_AREA,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub detection: DetectionConfig,
}

impl ServiceConfig {
    /// Load configuration from a TOML file; missing sections fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;

        if self.model.input_size == 0 {
            return Err(ConfigError::Invalid {
                field: "model.input_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if self.model.class_names.is_empty() {
            return Err(ConfigError::Invalid {
                field: "model.class_names".to_string(),
                message: "at least one class is required".to_string(),
            });
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "server.max_body_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .listen_addr
            .parse()
            .map_err(|e| ConfigError::Invalid {
                field: "server.listen_addr".to_string(),
                message: format!("'{}': {}", self.server.listen_addr, e),
            })
    }
}
