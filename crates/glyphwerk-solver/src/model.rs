// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pretrained neural classifier backend using the RTen inference runtime.
//
// The model is expected to take a `[1, 1, side, side]` NCHW f32 tensor of
// grayscale intensities scaled to 0..1 and produce a `[1, classes]` score
// tensor. The class with the highest score is decoded through the label
// vocabulary.

use std::path::Path;

use glyphwerk_core::{GlyphwerkError, Label, Result};
use image::GrayImage;
use rten::Model;
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;
use tracing::{info, instrument};

use crate::classifier::Classifier;
use crate::vocabulary::LabelVocabulary;

/// Letter classifier backed by a pretrained `.rten` model.
///
/// Model loading is the expensive step — load once at startup and share the
/// classifier across invocations. Inference itself holds no mutable state,
/// so concurrent `classify` calls are safe.
///
/// **Important:** `rten` must be compiled in release mode; debug builds are
/// extremely slow.
pub struct RtenClassifier {
    model: Model,
    vocabulary: LabelVocabulary,
    patch_size: u32,
}

impl RtenClassifier {
    /// Load a model file and bind it to its label vocabulary.
    ///
    /// `patch_size` must match the spatial input size the model was trained
    /// on (the pipeline's `SolverConfig::patch_size`).
    #[instrument(skip_all, fields(path = %path.as_ref().display(), patch_size))]
    pub fn load(
        path: impl AsRef<Path>,
        vocabulary: LabelVocabulary,
        patch_size: u32,
    ) -> Result<Self> {
        let model = Model::load_file(path.as_ref()).map_err(|err| {
            GlyphwerkError::Classifier(format!(
                "failed to load model from {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(classes = vocabulary.len(), "Letter model loaded");
        Ok(Self {
            model,
            vocabulary,
            patch_size,
        })
    }
}

impl Classifier for RtenClassifier {
    fn classify(&self, patch: &GrayImage) -> Result<Label> {
        let (w, h) = patch.dimensions();
        if w != self.patch_size || h != self.patch_size {
            return Err(GlyphwerkError::Classifier(format!(
                "expected a {0}x{0} patch, got {w}x{h}",
                self.patch_size
            )));
        }

        // NCHW with singleton batch and channel dims, intensities in 0..1.
        let mut input = NdTensor::<f32, 4>::zeros([1, 1, h as usize, w as usize]);
        for y in 0..h {
            for x in 0..w {
                input[[0, 0, y as usize, x as usize]] =
                    patch.get_pixel(x, y).0[0] as f32 / 255.0;
            }
        }

        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|err| GlyphwerkError::Classifier(format!("model inference failed: {err}")))?;

        let scores: NdTensor<f32, 2> = output.try_into().map_err(|_| {
            GlyphwerkError::Classifier("model output is not a [batch, class] tensor".into())
        })?;

        let row = scores.slice([0]);
        let best = row
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .ok_or_else(|| GlyphwerkError::Classifier("model returned no class scores".into()))?;

        let label = self.vocabulary.decode(best).ok_or_else(|| {
            GlyphwerkError::Classifier(format!(
                "model class {best} is outside the {}-entry vocabulary",
                self.vocabulary.len()
            ))
        })?;
        Ok(Label(label.to_owned()))
    }
}
