// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label vocabulary — the immutable bijection between model output indices and
// human-readable labels.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glyphwerk_core::{GlyphwerkError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bijection between classifier output indices and label strings.
///
/// Built once at startup from the alphabet the model was trained on, then
/// shared read-only for the process lifetime. Passed explicitly into
/// classifier backends rather than living in ambient global state, so tests
/// can substitute a stub vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    /// Build a vocabulary from an ordered list of labels, where position i is
    /// the label for model output index i.
    ///
    /// Fails on an empty list or duplicate labels — the mapping must be a
    /// bijection or `decode` would silently conflate classes.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if labels.is_empty() {
            return Err(GlyphwerkError::Vocabulary(
                "label vocabulary is empty".into(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(GlyphwerkError::Vocabulary(format!(
                    "duplicate label {label:?} breaks the index/label bijection"
                )));
            }
        }
        Ok(Self { labels })
    }

    /// Load a vocabulary from a JSON array file, e.g. `["2","3","A","B"]`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let labels: Vec<String> = serde_json::from_reader(BufReader::new(file))?;
        let vocabulary = Self::new(labels)?;
        debug!(classes = vocabulary.len(), "Label vocabulary loaded");
        Ok(vocabulary)
    }

    /// Label for a model output index, or `None` if the index is out of
    /// range.
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of classes in the vocabulary.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
