// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classify request types and validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::errors::ApiError;

/// Request for waste classification
///
/// `image` is kept as raw JSON so a wrongly-typed value can be told apart
/// from a missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Base64-encoded image, optionally as a `data:` URL
    #[serde(default)]
    pub image: Option<Value>,
}

impl ClassifyRequest {
    pub fn from_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(Value::String(image.into())),
        }
    }

    /// Validate the request and return the image payload
    pub fn validate(&self) -> Result<&str, ApiError> {
        match &self.image {
            None | Some(Value::Null) => Err(ApiError::MissingImage),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(ApiError::InvalidImage),
        }
    }
}
