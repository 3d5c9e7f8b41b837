// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline orchestration — wires normalization, binarization, region
// extraction, classification, and annotation into one call.

use std::sync::Arc;

use glyphwerk_core::{GlyphwerkError, Label, Result, SolverConfig};
use glyphwerk_vision::{
    Annotator, assemble_text, binarize_inverted, extract_patch, extract_regions, to_gray_canvas,
};
use image::RgbImage;
use tracing::{debug, info, instrument};

use crate::classifier::Classifier;

/// Success terminal state of one solve: the annotated diagnostic image and
/// the assembled CAPTCHA text. Failures never produce a partial `Solved`.
#[derive(Debug, Clone)]
pub struct Solved {
    /// 3-channel copy of the working canvas with region rectangles and
    /// predicted labels drawn on.
    pub annotated: RgbImage,
    /// Predicted labels concatenated in left-to-right order.
    pub text: String,
}

/// The CAPTCHA solving pipeline.
///
/// Each invocation runs synchronously to completion on freshly allocated
/// buffers: normalize → binarize → extract regions → classify each region →
/// annotate and assemble. The only shared state is the classifier, which is
/// read-only after construction, so one solver can serve concurrent callers.
pub struct CaptchaSolver {
    config: SolverConfig,
    classifier: Arc<dyn Classifier>,
    annotator: Annotator,
}

impl CaptchaSolver {
    /// Create a solver with the default configuration and a rectangles-only
    /// annotator.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            config: SolverConfig::default(),
            classifier,
            annotator: Annotator::new(),
        }
    }

    /// Replace the pipeline configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the annotator (e.g. one with a font for label text).
    pub fn with_annotator(mut self, annotator: Annotator) -> Self {
        self.annotator = annotator;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a decoded CAPTCHA image.
    ///
    /// Any stage failure is terminal for this invocation: the error carries a
    /// human-readable message and no annotated image or partial text is
    /// produced. The heuristics are deterministic, so retrying the same
    /// input reproduces the same outcome — a new attempt needs a new image.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn solve(&self, image: &RgbImage) -> Result<Solved> {
        let canvas = to_gray_canvas(image, self.config.canvas_margin);
        let mask = binarize_inverted(&canvas);
        let regions = extract_regions(&mask, &self.config)?;

        let mut labels: Vec<Label> = Vec::with_capacity(regions.len());
        for bbox in &regions {
            let patch = extract_patch(&canvas, bbox, &self.config);
            let label = self.classifier.classify(&patch)?;
            if label.as_str().is_empty() {
                return Err(GlyphwerkError::Classifier(
                    "classifier returned an empty label".into(),
                ));
            }
            debug!(x = bbox.x, label = %label, "Region classified");
            labels.push(label);
        }

        let annotated = self
            .annotator
            .annotate(&canvas, &regions, &labels, &self.config);
        let text = assemble_text(&labels);
        info!(%text, "CAPTCHA solved");

        Ok(Solved { annotated, text })
    }

    /// Solve from raw encoded image bytes (PNG, JPEG, BMP, ...).
    ///
    /// This is the upload boundary: decode failures are reported as
    /// [`GlyphwerkError::InvalidImage`] and never reach the segmentation
    /// core.
    #[instrument(skip_all, fields(data_len = bytes.len()))]
    pub fn solve_bytes(&self, bytes: &[u8]) -> Result<Solved> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| GlyphwerkError::InvalidImage(format!("failed to decode image: {err}")))?;
        self.solve(&decoded.to_rgb8())
    }
}
