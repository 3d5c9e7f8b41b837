// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global Otsu binarization producing an inverted ink mask.

use image::{GrayImage, Luma};
use tracing::{debug, instrument};

/// Compute the Otsu threshold for a grayscale image.
///
/// Finds the threshold value that maximises the between-class variance of the
/// dark and light pixel groups (equivalently, minimises intra-class
/// variance). Deterministic: ties resolve to the lowest threshold.
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total_pixels = gray.width() as u64 * gray.height() as u64;
    if total_pixels == 0 {
        return 128;
    }

    let mut sum_total: f64 = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        sum_total += i as f64 * count as f64;
    }

    let mut sum_background: f64 = 0.0;
    let mut weight_background: u64 = 0;
    let mut max_variance: f64 = 0.0;
    let mut best_threshold: u8 = 0;

    for (t, &count) in histogram.iter().enumerate() {
        weight_background += count;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total_pixels - weight_background;
        if weight_foreground == 0 {
            break;
        }

        sum_background += t as f64 * count as f64;
        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) / weight_foreground as f64;

        let between_variance = weight_background as f64
            * weight_foreground as f64
            * (mean_background - mean_foreground).powi(2);

        if between_variance > max_variance {
            max_variance = between_variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Binarize the grayscale canvas into an inverted ink mask.
///
/// CAPTCHA glyphs are dark ink on a light background; the inverted threshold
/// makes ink the "on" value (255) so contour extraction sees glyphs as
/// foreground blobs. Pixels at or below the Otsu cut become 255, everything
/// else 0. An all-one-color canvas yields a mask with zero foreground, which
/// the region extractor reports as a letter-count failure downstream.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn binarize_inverted(gray: &GrayImage) -> GrayImage {
    let threshold = otsu_threshold(gray);
    debug!(threshold, "Otsu threshold computed");

    let (width, height) = gray.dimensions();
    let mut mask = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let val = gray.get_pixel(x, y).0[0];
            let on = if val <= threshold { 255u8 } else { 0u8 };
            mask.put_pixel(x, y, Luma([on]));
        }
    }
    mask
}
