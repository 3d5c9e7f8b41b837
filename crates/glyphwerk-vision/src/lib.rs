// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// glyphwerk-vision — Image-side half of the Glyphwerk CAPTCHA engine.
//
// Provides canvas normalization (grayscale + replicated border), Otsu
// binarization with an inverted ink mask, contour-based letter region
// extraction with the fused-character split heuristic, classifier patch
// normalization, and annotation drawing.

pub mod annotate;
pub mod binarize;
pub mod canvas;
pub mod patch;
pub mod regions;

// Re-export the primary entry points so callers can use
// `glyphwerk_vision::extract_regions` etc.
pub use annotate::{Annotator, assemble_text};
pub use binarize::{binarize_inverted, otsu_threshold};
pub use canvas::to_gray_canvas;
pub use patch::{extract_patch, resize_to_fit};
pub use regions::extract_regions;
