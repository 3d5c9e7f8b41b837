// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Diagnostic annotation — draw region rectangles and predicted labels onto a
// color copy of the canvas, and assemble the final text.

use ab_glyph::{FontVec, PxScale};
use glyphwerk_core::{Label, RegionSet, Result, SolverConfig};
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{debug, instrument, warn};

/// Annotation ink: green, the conventional diagnostic overlay color.
const ANNOTATION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Label text size in pixels.
const LABEL_SCALE: f32 = 16.0;

/// Vertical offset of the label baseline above a region box.
const LABEL_OFFSET: i32 = 20;

/// Well-known font locations probed by [`Annotator::from_system_fonts`].
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Draws diagnostic overlays for solved (or attempted) CAPTCHAs.
///
/// The font is optional: without one, region rectangles are still drawn and
/// label text is skipped with a warning, so headless deployments without any
/// system fonts degrade gracefully instead of failing the whole pipeline.
pub struct Annotator {
    font: Option<FontVec>,
}

impl Annotator {
    // -- Construction ---------------------------------------------------------

    /// Create an annotator that draws rectangles only.
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Create an annotator rendering label text with the given TTF/OTF font
    /// bytes.
    pub fn from_font_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|err| {
            glyphwerk_core::GlyphwerkError::ImageError(format!("failed to parse font: {err}"))
        })?;
        Ok(Self { font: Some(font) })
    }

    /// Create an annotator using the first readable font from a set of
    /// well-known system locations. Falls back to rectangles-only when none
    /// is found.
    pub fn from_system_fonts() -> Self {
        for path in SYSTEM_FONT_PATHS {
            if let Ok(bytes) = std::fs::read(path) {
                if let Ok(annotator) = Self::from_font_bytes(bytes) {
                    debug!(path, "Annotation font loaded");
                    return annotator;
                }
            }
        }
        warn!("No system font found; annotations will omit label text");
        Self::new()
    }

    /// Whether label text will be rendered.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    // -- Drawing --------------------------------------------------------------

    /// Draw one rectangle and label per region onto a 3-channel copy of the
    /// grayscale canvas.
    ///
    /// Rectangles are expanded by the same margin used when cropping the
    /// classifier patch, so the overlay outlines exactly what the model saw.
    /// `labels` must be in the same left-to-right order as `regions`.
    #[instrument(skip_all, fields(regions = regions.len()))]
    pub fn annotate(
        &self,
        canvas: &GrayImage,
        regions: &RegionSet,
        labels: &[Label],
        config: &SolverConfig,
    ) -> RgbImage {
        debug_assert_eq!(regions.len(), labels.len(), "one label per region");

        let mut output: RgbImage = DynamicImage::ImageLuma8(canvas.clone()).to_rgb8();
        let (canvas_w, canvas_h) = output.dimensions();

        for (bbox, label) in regions.iter().zip(labels) {
            let outline = bbox.expand(config.patch_margin, canvas_w, canvas_h);
            draw_hollow_rect_mut(
                &mut output,
                Rect::at(outline.x as i32, outline.y as i32)
                    .of_size(outline.width, outline.height),
                ANNOTATION_COLOR,
            );

            if let Some(font) = &self.font {
                let text_x = bbox.x as i32 - 5;
                let text_y = (bbox.y as i32 - LABEL_OFFSET).max(0);
                draw_text_mut(
                    &mut output,
                    ANNOTATION_COLOR,
                    text_x.max(0),
                    text_y,
                    PxScale::from(LABEL_SCALE),
                    font,
                    label.as_str(),
                );
            }
        }

        if self.font.is_none() && !labels.is_empty() {
            warn!("Annotating without a font; label text omitted");
        }

        output
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate predicted labels in region order into the final CAPTCHA text.
/// No separators: a four-letter CAPTCHA yields a four-character string.
pub fn assemble_text(labels: &[Label]) -> String {
    labels.iter().map(Label::as_str).collect()
}
