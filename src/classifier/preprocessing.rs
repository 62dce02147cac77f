// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the garbage classifier

use image::{DynamicImage, Rgb, RgbImage};
use ndarray::Array4;

use crate::config::ChannelOrder;

/// Preprocess an image for classification
///
/// Steps:
/// 1. Convert to 8-bit RGB
/// 2. Resize exactly to `input_size` x `input_size` (bilinear, aspect ratio not kept)
/// 3. Scale to [0, 1] by dividing by 255
/// 4. Lay out as NHWC tensor [1, H, W, 3] in the requested channel order
pub fn preprocess(image: &DynamicImage, input_size: u32, order: ChannelOrder) -> Array4<f32> {
    let rgb = resize_bilinear(&image.to_rgb8(), input_size, input_size);

    let size = input_size as usize;
    let mut tensor = Array4::zeros((1, size, size, 3));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let channels = match order {
            ChannelOrder::Rgb => [r, g, b],
            ChannelOrder::Bgr => [b, g, r],
        };

        for (c, value) in channels.iter().enumerate() {
            tensor[[0, y as usize, x as usize, c]] = *value as f32 / 255.0;
        }
    }

    tensor
}

/// Source sample position for one destination index (half-pixel centres)
///
/// Returns the left/top neighbour and the weight of the right/bottom one.
/// Out-of-range positions clamp to the edge pixel.
fn sample_axis(dst: u32, scale: f32, src_len: u32) -> (u32, u32, f32) {
    let pos = (dst as f32 + 0.5) * scale - 0.5;
    let lo = pos.floor();

    if lo < 0.0 {
        return (0, 0, 0.0);
    }

    let lo = lo as u32;
    if lo >= src_len - 1 {
        return (src_len - 1, src_len - 1, 0.0);
    }

    (lo, lo + 1, pos - lo as f32)
}

/// Bilinear resize reading only the 2x2 neighbourhood of each sample
///
/// Unlike `FilterType::Triangle`, the kernel does not widen when shrinking,
/// so downscaled inputs keep the sharpness the network was trained on.
fn resize_bilinear(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    if src.width() == 0 || src.height() == 0 {
        return RgbImage::new(width, height);
    }

    let scale_x = src.width() as f32 / width as f32;
    let scale_y = src.height() as f32 / height as f32;
    let columns: Vec<_> = (0..width)
        .map(|x| sample_axis(x, scale_x, src.width()))
        .collect();

    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        let (y0, y1, wy) = sample_axis(y, scale_y, src.height());

        for (x, &(x0, x1, wx)) in columns.iter().enumerate() {
            let p00 = src.get_pixel(x0, y0).0;
            let p10 = src.get_pixel(x1, y0).0;
            let p01 = src.get_pixel(x0, y1).0;
            let p11 = src.get_pixel(x1, y1).0;

            let mut pixel = [0u8; 3];
            for c in 0..3 {
                let top = p00[c] as f32 * (1.0 - wx) + p10[c] as f32 * wx;
                let bottom = p01[c] as f32 * (1.0 - wx) + p11[c] as f32 * wx;
                let value = top * (1.0 - wy) + bottom * wy;
                pixel[c] = value.round().clamp(0.0, 255.0) as u8;
            }
            out.put_pixel(x as u32, y, Rgb(pixel));
        }
    }

    out
}
