// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Glyphwerk.

use thiserror::Error;

/// Top-level error type for all Glyphwerk operations.
#[derive(Debug, Error)]
pub enum GlyphwerkError {
    // -- Input boundary --
    #[error("invalid image input: {0}")]
    InvalidImage(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Segmentation --
    #[error("incorrect number of letters detected: expected {expected}, found {found}")]
    IncorrectLetterCount { expected: usize, found: usize },

    // -- Classification --
    #[error("classifier failed: {0}")]
    Classifier(String),

    #[error("label vocabulary error: {0}")]
    Vocabulary(String),

    // -- I/O and serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GlyphwerkError>;
