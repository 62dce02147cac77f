// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for uploaded waste photos
//!
//! This module provides:
//! - Base64 / data-URL image decoding
//! - Foreground object counting via Otsu thresholding and contours

pub mod image_utils;
pub mod object_counter;

pub use image_utils::{decode_base64_image, decode_image_bytes, detect_format, ImageError, ImageInfo};
pub use object_counter::{count_objects, detect_objects, ObjectBox, DEFAULT_MIN_OBJECT_AREA};
