// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and in-memory image fixtures.

use image_rs::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-4;

/// Asserts that two opacities are equal within [`F32_EPSILON`].
#[track_caller]
pub fn assert_opacity(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= F32_EPSILON,
        "opacity {actual} differs from expected {expected}"
    );
}

/// Encodes a solid red PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("failed to encode png");
    bytes
}
