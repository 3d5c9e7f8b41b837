// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Letter region extraction — external contours, the fused-character split
// heuristic, and the arity gate.

use glyphwerk_core::{BoundingBox, RegionSet, Result, SolverConfig};
use image::GrayImage;
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::point::Point;
use tracing::{debug, instrument, warn};

/// Extract the ordered letter regions from a binary ink mask.
///
/// Finds the outer boundary of every connected foreground blob and takes its
/// tight bounding box. A box whose width/height ratio exceeds
/// `split_aspect_ratio` is assumed to be two characters that the
/// binarization merged into one blob; it is replaced by two side-by-side
/// halves. Real CAPTCHA renderers kern characters close enough for this to
/// happen regularly, and the aspect-ratio split is a cheap heuristic that
/// trades recall for simplicity — when it guesses wrong, the letter count
/// comes out wrong and the failure is surfaced rather than papered over.
///
/// Exactly `captcha_length` boxes must result, or the invocation fails with
/// [`GlyphwerkError::IncorrectLetterCount`] and no partial result. The
/// surviving boxes are sorted by ascending `x` into reading order.
///
/// [`GlyphwerkError::IncorrectLetterCount`]: glyphwerk_core::GlyphwerkError::IncorrectLetterCount
#[instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn extract_regions(mask: &GrayImage, config: &SolverConfig) -> Result<RegionSet> {
    let contours: Vec<Contour<u32>> = find_contours(mask);

    let mut boxes = Vec::new();
    for contour in &contours {
        // Outer boundaries only; holes inside a glyph are not letters.
        if contour.border_type != BorderType::Outer {
            continue;
        }
        let Some(bbox) = bounding_box(&contour.points) else {
            continue;
        };

        if bbox.aspect_ratio() > config.split_aspect_ratio {
            let (left, right) = bbox.split_horizontal();
            debug!(?bbox, ?left, ?right, "Split suspected fused characters");
            boxes.push(left);
            boxes.push(right);
        } else {
            boxes.push(bbox);
        }
    }

    debug!(
        contour_count = contours.len(),
        region_count = boxes.len(),
        "Contours extracted"
    );

    if boxes.len() != config.captcha_length {
        warn!(
            expected = config.captcha_length,
            found = boxes.len(),
            "Letter count mismatch"
        );
    }

    RegionSet::from_boxes(boxes, config.captcha_length)
}

/// Tight axis-aligned bounding box of a contour's boundary points.
fn bounding_box(points: &[Point<u32>]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox::new(
        min_x,
        min_y,
        max_x - min_x + 1,
        max_y - min_y + 1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphwerk_core::GlyphwerkError;
    use image::Luma;

    /// Paint a filled foreground rectangle onto a mask.
    fn blob(mask: &mut GrayImage, x: u32, y: u32, w: u32, h: u32) {
        for yy in y..y + h {
            for xx in x..x + w {
                mask.put_pixel(xx, yy, Luma([255u8]));
            }
        }
    }

    #[test]
    fn four_separated_blobs_become_four_sorted_regions() {
        let mut mask = GrayImage::new(140, 60);
        // Deliberately not in reading order.
        blob(&mut mask, 50, 20, 10, 20);
        blob(&mut mask, 10, 20, 10, 20);
        blob(&mut mask, 30, 20, 10, 20);
        blob(&mut mask, 70, 20, 10, 20);

        let regions = extract_regions(&mask, &SolverConfig::default()).unwrap();
        let xs: Vec<u32> = regions.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![10, 30, 50, 70]);
        for b in &regions {
            assert_eq!((b.width, b.height), (10, 20));
        }
    }

    #[test]
    fn wide_blob_splits_into_adjacent_halves() {
        let mut mask = GrayImage::new(160, 60);
        // Aspect 30/20 = 1.5 > 1.25 — must split into two 15-wide halves.
        blob(&mut mask, 20, 15, 30, 20);
        // Two narrow blobs complete the expected count of four.
        blob(&mut mask, 80, 15, 10, 20);
        blob(&mut mask, 110, 15, 10, 20);

        let regions = extract_regions(&mask, &SolverConfig::default()).unwrap();
        assert_eq!(regions.len(), 4);
        let (left, right) = (regions[0], regions[1]);
        assert_eq!(left, BoundingBox::new(20, 15, 15, 20));
        assert_eq!(right, BoundingBox::new(35, 15, 15, 20));
        assert_eq!(left.right(), right.x);
    }

    #[test]
    fn square_blob_is_not_split() {
        let mut mask = GrayImage::new(160, 60);
        // Aspect exactly 1.0 — kept whole.
        blob(&mut mask, 20, 15, 20, 20);
        blob(&mut mask, 60, 15, 10, 20);
        blob(&mut mask, 90, 15, 10, 20);
        blob(&mut mask, 120, 15, 10, 20);

        let regions = extract_regions(&mask, &SolverConfig::default()).unwrap();
        assert_eq!(regions[0], BoundingBox::new(20, 15, 20, 20));
    }

    #[test]
    fn three_blobs_fail_the_arity_gate() {
        let mut mask = GrayImage::new(120, 60);
        blob(&mut mask, 10, 20, 10, 20);
        blob(&mut mask, 40, 20, 10, 20);
        blob(&mut mask, 70, 20, 10, 20);

        let err = extract_regions(&mask, &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GlyphwerkError::IncorrectLetterCount {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn five_blobs_fail_the_arity_gate() {
        let mut mask = GrayImage::new(200, 60);
        for i in 0..5u32 {
            blob(&mut mask, 10 + i * 30, 20, 10, 20);
        }

        let err = extract_regions(&mask, &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GlyphwerkError::IncorrectLetterCount {
                expected: 4,
                found: 5
            }
        ));
    }

    #[test]
    fn empty_mask_reports_zero_letters() {
        let mask = GrayImage::new(80, 40);
        let err = extract_regions(&mask, &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GlyphwerkError::IncorrectLetterCount {
                expected: 4,
                found: 0
            }
        ));
    }

    #[test]
    fn holes_inside_a_glyph_are_ignored() {
        // A ring: 20x20 blob with a 6x6 hole. The hole's inner contour must
        // not become a letter region.
        let mut mask = GrayImage::new(160, 60);
        blob(&mut mask, 20, 15, 20, 20);
        for yy in 22..28 {
            for xx in 27..33 {
                mask.put_pixel(xx, yy, Luma([0u8]));
            }
        }
        blob(&mut mask, 60, 15, 10, 20);
        blob(&mut mask, 90, 15, 10, 20);
        blob(&mut mask, 120, 15, 10, 20);

        let regions = extract_regions(&mask, &SolverConfig::default()).unwrap();
        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0], BoundingBox::new(20, 15, 20, 20));
    }

    #[test]
    fn extraction_is_deterministic() {
        let mut mask = GrayImage::new(140, 60);
        blob(&mut mask, 12, 18, 11, 21);
        blob(&mut mask, 35, 18, 9, 21);
        blob(&mut mask, 60, 18, 10, 21);
        blob(&mut mask, 85, 18, 10, 21);

        let a = extract_regions(&mask, &SolverConfig::default()).unwrap();
        let b = extract_regions(&mask, &SolverConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
