// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classify API endpoint module
//!
//! Provides POST /api/classify for labelling photos of waste.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{classify_handler, classify_image_payload};
pub use request::ClassifyRequest;
pub use response::{Classification, ClassifyResponse};
