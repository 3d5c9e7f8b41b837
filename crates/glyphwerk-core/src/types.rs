// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Glyphwerk CAPTCHA engine.

use serde::{Deserialize, Serialize};

use crate::error::{GlyphwerkError, Result};

/// Axis-aligned bounding box of one candidate letter region, in pixel
/// coordinates on the padded canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "degenerate bounding box");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column covered by this box.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottommost row covered by this box.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Width over height. Wide boxes signal two characters fused into one
    /// blob by the binarization.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Split a wide box into two side-by-side halves sharing `y` and
    /// `height`. The left half is `floor(width / 2)` wide; the right half
    /// takes the remainder, so for odd widths it is one pixel wider. The
    /// asymmetry is deliberate and must not be "corrected" to a symmetric
    /// split: downstream consumers rely on the two halves tiling the
    /// original box exactly.
    pub fn split_horizontal(&self) -> (BoundingBox, BoundingBox) {
        let half = self.width / 2;
        let left = BoundingBox::new(self.x, self.y, half, self.height);
        let right = BoundingBox::new(self.x + half, self.y, self.width - half, self.height);
        (left, right)
    }

    /// Grow the box by `margin` pixels on every side, clamped to a
    /// `canvas_w` x `canvas_h` canvas.
    pub fn expand(&self, margin: u32, canvas_w: u32, canvas_h: u32) -> BoundingBox {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        let right = (self.right() + margin).min(canvas_w);
        let bottom = (self.bottom() + margin).min(canvas_h);
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

/// The ordered set of letter regions for one CAPTCHA, sorted left to right.
///
/// Construction goes through [`RegionSet::from_boxes`], which enforces the
/// arity contract: a CAPTCHA of length N must segment into exactly N regions
/// or the whole invocation fails. There is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSet {
    boxes: Vec<BoundingBox>,
}

impl RegionSet {
    /// Validate the arity contract and sort the boxes into left-to-right
    /// reading order (stable sort on `x` alone, so equal-x boxes keep their
    /// discovery order and repeated runs stay deterministic).
    pub fn from_boxes(mut boxes: Vec<BoundingBox>, expected: usize) -> Result<Self> {
        if boxes.len() != expected {
            return Err(GlyphwerkError::IncorrectLetterCount {
                expected,
                found: boxes.len(),
            });
        }
        boxes.sort_by_key(|b| b.x);
        Ok(Self { boxes })
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.boxes.iter()
    }

    pub fn as_slice(&self) -> &[BoundingBox] {
        &self.boxes
    }
}

impl std::ops::Index<usize> for RegionSet {
    type Output = BoundingBox;

    fn index(&self, index: usize) -> &BoundingBox {
        &self.boxes[index]
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

/// A predicted character for one segmented region. The pipeline treats the
/// content as opaque; the classifier's vocabulary owns the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label(pub String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
