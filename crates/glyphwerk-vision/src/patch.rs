// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Classifier patch normalization — crop a letter region with context margin
// and resize it to the fixed square input shape the model expects.

use glyphwerk_core::{BoundingBox, SolverConfig};
use image::{GrayImage, Luma, imageops};
use tracing::{debug, instrument};

/// Background value used when padding a patch out to a square. CAPTCHA ink is
/// dark on a light background, so padding is white.
const PATCH_BACKGROUND: u8 = 255;

/// Crop one letter region from the grayscale canvas and normalize it to the
/// classifier's fixed square input size.
///
/// The crop takes the region expanded by `patch_margin` on every side, giving
/// the model a little context beyond the tight contour box. Classification
/// reads the original grayscale intensities; the binary mask was only used to
/// locate the box. The canvas margin added during normalization exceeds the
/// patch margin, so crops of valid upstream boxes never leave the canvas;
/// the expansion still clamps to the canvas bounds.
#[instrument(skip(canvas, config))]
pub fn extract_patch(canvas: &GrayImage, bbox: &BoundingBox, config: &SolverConfig) -> GrayImage {
    let expanded = bbox.expand(config.patch_margin, canvas.width(), canvas.height());
    let crop = imageops::crop_imm(
        canvas,
        expanded.x,
        expanded.y,
        expanded.width,
        expanded.height,
    )
    .to_image();
    debug!(
        crop_w = crop.width(),
        crop_h = crop.height(),
        "Region cropped"
    );
    resize_to_fit(&crop, config.patch_size)
}

/// Resize a grayscale image to fit a `side` x `side` square, preserving
/// aspect ratio.
///
/// The longer dimension is scaled to `side`; the shorter dimension is padded
/// symmetrically with background to reach an exact square. Odd padding
/// remainders go to the right/bottom edge.
pub fn resize_to_fit(image: &GrayImage, side: u32) -> GrayImage {
    debug_assert!(side > 0, "patch side must be positive");
    let (w, h) = image.dimensions();

    let (new_w, new_h) = if w >= h {
        let scaled_h = ((h as f32 * side as f32 / w as f32).round() as u32).clamp(1, side);
        (side, scaled_h)
    } else {
        let scaled_w = ((w as f32 * side as f32 / h as f32).round() as u32).clamp(1, side);
        (scaled_w, side)
    };

    let resized = imageops::resize(image, new_w, new_h, imageops::FilterType::Lanczos3);

    let mut out = GrayImage::from_pixel(side, side, Luma([PATCH_BACKGROUND]));
    let pad_x = (side - new_w) / 2;
    let pad_y = (side - new_h) / 2;
    imageops::replace(&mut out, &resized, pad_x as i64, pad_y as i64);
    out
}
