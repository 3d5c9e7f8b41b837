// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The classifier capability boundary.

use glyphwerk_core::{GlyphwerkError, Label, Result};
use image::GrayImage;

/// One-patch-in, one-label-out classification capability.
///
/// The pipeline treats the model as a black box behind this trait: a lookup
/// table, a pretrained network (see `RtenClassifier` behind the `rten`
/// feature), or a remote inference service all satisfy it. Implementations
/// must be safe for concurrent read-only use — the solver shares one
/// instance across invocations without locking. A backend whose underlying
/// runtime is not reentrant should serialize calls internally (a mutex
/// around the inference call only, never around the whole pipeline).
pub trait Classifier: Send + Sync {
    /// Classify one normalized grayscale patch and return its label.
    ///
    /// Errors propagate unchanged to the pipeline level; there is no retry.
    /// An empty label is malformed output and must be reported as
    /// [`GlyphwerkError::Classifier`].
    fn classify(&self, patch: &GrayImage) -> Result<Label>;
}

/// Classifier that always returns the same label.
///
/// Useful as a diagnostic backend and in tests, where it isolates the
/// segmentation pipeline from model behaviour.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    label: Label,
}

impl FixedClassifier {
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(GlyphwerkError::Classifier(
                "fixed classifier label must be non-empty".into(),
            ));
        }
        Ok(Self {
            label: Label(label),
        })
    }
}

impl Classifier for FixedClassifier {
    fn classify(&self, _patch: &GrayImage) -> Result<Label> {
        Ok(self.label.clone())
    }
}
