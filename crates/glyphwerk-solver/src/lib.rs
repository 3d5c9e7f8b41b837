// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// glyphwerk-solver — Classifier boundary and pipeline orchestration for the
// Glyphwerk CAPTCHA engine.
//
// The classifier is a single-method capability (`classify(patch) -> Label`);
// any backend can satisfy it. A pretrained neural backend using `rten` is
// available behind the `rten` feature gate.

pub mod classifier;
pub mod pipeline;
pub mod vocabulary;

#[cfg(feature = "rten")]
pub mod model;

pub use classifier::{Classifier, FixedClassifier};
pub use pipeline::{CaptchaSolver, Solved};
pub use vocabulary::LabelVocabulary;

#[cfg(feature = "rten")]
pub use model::RtenClassifier;
