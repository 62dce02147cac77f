// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_IMAGE_MESSAGE: &str = "No image data provided";
pub const INVALID_IMAGE_MESSAGE: &str = "Invalid image data";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client-facing failures. Detail stays in the logs; clients get a generic message.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Body missing, not JSON, or without an `image` field
    MissingImage,
    /// `image` present but not a decodable picture
    InvalidImage,
    InternalError,
}

impl ApiError {
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MissingImage => NO_IMAGE_MESSAGE,
            ApiError::InvalidImage => INVALID_IMAGE_MESSAGE,
            ApiError::InternalError => INTERNAL_ERROR_MESSAGE,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.message().to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::InvalidImage => StatusCode::BAD_REQUEST,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
