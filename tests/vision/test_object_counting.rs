// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Object counting tests on synthetic photos

use image::{DynamicImage, Rgb, RgbImage};
use waste_classifier_node::vision::{count_objects, detect_objects, DEFAULT_MIN_OBJECT_AREA};

fn white(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([250, 250, 250]))
}

fn draw_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
    for yy in y..y + h {
        for xx in x..x + w {
            img.put_pixel(xx, yy, Rgb(color));
        }
    }
}

#[test]
fn test_counts_three_items() {
    let mut img = white(300, 200);
    draw_rect(&mut img, 10, 10, 60, 60, [20, 20, 20]);
    draw_rect(&mut img, 110, 40, 40, 80, [30, 10, 10]);
    draw_rect(&mut img, 200, 120, 70, 50, [10, 30, 10]);

    assert_eq!(
        count_objects(&DynamicImage::ImageRgb8(img), DEFAULT_MIN_OBJECT_AREA),
        3
    );
}

#[test]
fn test_area_cutoff_is_inclusive() {
    // 20x25 = 500 exactly
    let mut img = white(100, 100);
    draw_rect(&mut img, 30, 30, 20, 25, [0, 0, 0]);
    let image = DynamicImage::ImageRgb8(img);

    assert_eq!(count_objects(&image, 500), 1);
    assert_eq!(count_objects(&image, 501), 0);
}

#[test]
fn test_bounding_boxes_reported() {
    let mut img = white(120, 80);
    draw_rect(&mut img, 15, 10, 30, 40, [0, 0, 0]);
    let boxes = detect_objects(&DynamicImage::ImageRgb8(img), DEFAULT_MIN_OBJECT_AREA);

    assert_eq!(boxes.len(), 1);
    assert_eq!((boxes[0].x, boxes[0].y), (15, 10));
    assert_eq!((boxes[0].width, boxes[0].height), (30, 40));
    assert_eq!(boxes[0].area(), 1200);
}

#[test]
fn test_hollow_frame_counts_once() {
    let mut img = white(100, 100);
    draw_rect(&mut img, 10, 10, 80, 80, [0, 0, 0]);
    draw_rect(&mut img, 20, 20, 60, 60, [250, 250, 250]);

    assert_eq!(count_objects(&DynamicImage::ImageRgb8(img), DEFAULT_MIN_OBJECT_AREA), 1);
}

#[test]
fn test_tiny_blank_photo_has_no_objects() {
    // even a full-frame region stays under the cutoff
    let img = white(20, 20);
    assert_eq!(count_objects(&DynamicImage::ImageRgb8(img), DEFAULT_MIN_OBJECT_AREA), 0);
}
