// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Foreground object counting
//!
//! A classical heuristic that runs next to the classifier:
//! grayscale, inverse Otsu threshold, external contours, then a
//! bounding-box area cutoff to drop specks and noise.
//!
//! Grayscale uses BT.601 weights in 14-bit fixed point, as OpenCV does for
//! `COLOR_BGR2GRAY`.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use tracing::debug;

/// Bounding boxes smaller than this many pixels are not counted
pub const DEFAULT_MIN_OBJECT_AREA: u32 = 500;

/// Axis-aligned bounding box of a contour, inclusive of both edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ObjectBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    fn from_contour(contour: &Contour<u32>) -> Option<Self> {
        let first = contour.points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);

        for p in &contour.points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }
}

// BT.601 luma weights scaled by 2^14; they sum to 1 << 14
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Grayscale with BT.601 weights (0.299 R + 0.587 G + 0.114 B), rounded
pub fn to_gray(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let sum = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
        Luma([((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Binarize so that dark objects on a light background become foreground (255)
pub fn binarize(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    debug!("Otsu level: {}", level);
    threshold(gray, level, ThresholdType::BinaryInverted)
}

/// Bounding boxes of all outermost foreground regions at or above `min_area`
pub fn detect_objects(image: &DynamicImage, min_area: u32) -> Vec<ObjectBox> {
    if image.width() == 0 || image.height() == 0 {
        return Vec::new();
    }

    let mask = binarize(&to_gray(image));

    find_contours::<u32>(&mask)
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(ObjectBox::from_contour)
        .filter(|b| b.area() >= min_area as u64)
        .collect()
}

/// Number of foreground objects in the image
pub fn count_objects(image: &DynamicImage, min_area: u32) -> usize {
    let objects = detect_objects(image, min_area);
    debug!("Counted {} objects (min area {})", objects.len(), min_area);
    objects.len()
}
