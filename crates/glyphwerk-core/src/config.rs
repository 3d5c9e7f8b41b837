// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Solver configuration.

use serde::{Deserialize, Serialize};

/// Tunable parameters of the segmentation and classification pipeline.
///
/// The defaults target the common four-letter CAPTCHA format; the same
/// pipeline generalizes to other fixed lengths by changing `captcha_length`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Exact number of letter regions a valid CAPTCHA must segment into.
    pub captcha_length: usize,
    /// Replicated border added around the grayscale canvas before
    /// thresholding, so contours near the original image edge are not
    /// truncated.
    pub canvas_margin: u32,
    /// Width/height ratio above which a contour bounding box is assumed to
    /// contain two fused characters and is split in half.
    pub split_aspect_ratio: f32,
    /// Extra context (in pixels, each side) added around a region before
    /// cropping the classifier patch and when drawing annotation rectangles.
    pub patch_margin: u32,
    /// Side length of the square patch fed to the classifier.
    pub patch_size: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            captcha_length: 4,
            canvas_margin: 20,
            split_aspect_ratio: 1.25,
            patch_margin: 2,
            patch_size: 20,
        }
    }
}
