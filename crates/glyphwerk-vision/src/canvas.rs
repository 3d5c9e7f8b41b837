// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas normalization — grayscale conversion and replicated-border padding.

use image::{GrayImage, Luma, RgbImage};
use tracing::{debug, instrument};

/// Convert a color CAPTCHA image into the padded grayscale working canvas.
///
/// The border replicates the nearest edge pixel (rather than filling with a
/// constant) so that thresholding and contour detection near the original
/// image border behave the same as in the interior. Output dimensions are
/// `width + 2 * margin` by `height + 2 * margin`.
///
/// Zero-area input is a contract violation by the caller; the decode boundary
/// rejects such images before they reach this point.
#[instrument(skip(image), fields(width = image.width(), height = image.height(), margin))]
pub fn to_gray_canvas(image: &RgbImage, margin: u32) -> GrayImage {
    debug_assert!(
        image.width() > 0 && image.height() > 0,
        "zero-area input image"
    );

    let gray: GrayImage = image::imageops::grayscale(image);
    let canvas = pad_replicate(&gray, margin);
    debug!(
        canvas_w = canvas.width(),
        canvas_h = canvas.height(),
        "Canvas normalized"
    );
    canvas
}

/// Pad all four edges of a grayscale image by `margin` pixels, replicating
/// the nearest edge pixel.
pub fn pad_replicate(gray: &GrayImage, margin: u32) -> GrayImage {
    let (w, h) = gray.dimensions();
    if margin == 0 {
        return gray.clone();
    }

    GrayImage::from_fn(w + 2 * margin, h + 2 * margin, |x, y| {
        let sx = (x as i64 - margin as i64).clamp(0, w as i64 - 1) as u32;
        let sy = (y as i64 - margin as i64).clamp(0, h as i64 - 1) as u32;
        Luma([gray.get_pixel(sx, sy).0[0]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn canvas_grows_by_twice_the_margin() {
        let img = RgbImage::from_pixel(30, 12, Rgb([200, 200, 200]));
        let canvas = to_gray_canvas(&img, 20);
        assert_eq!(canvas.dimensions(), (70, 52));
    }

    #[test]
    fn border_replicates_edge_pixels() {
        // Left column dark, rest light.
        let mut img = RgbImage::from_pixel(10, 10, Rgb([250, 250, 250]));
        for y in 0..10 {
            img.put_pixel(0, y, Rgb([10, 10, 10]));
        }
        let canvas = to_gray_canvas(&img, 5);

        let corner = canvas.get_pixel(0, 0).0[0];
        let left_edge = canvas.get_pixel(2, 7).0[0];
        let interior_origin = canvas.get_pixel(5, 5).0[0];
        // Padding left of column 0 must carry the dark edge value.
        assert_eq!(corner, interior_origin);
        assert_eq!(left_edge, interior_origin);
        assert!(interior_origin < 50);

        // Padding beyond the right edge must be light.
        let right_pad = canvas.get_pixel(canvas.width() - 1, 7).0[0];
        assert!(right_pad > 200);
    }

    #[test]
    fn zero_margin_is_plain_grayscale() {
        let img = RgbImage::from_pixel(8, 6, Rgb([100, 100, 100]));
        let canvas = to_gray_canvas(&img, 0);
        assert_eq!(canvas.dimensions(), (8, 6));
    }

    #[test]
    fn grayscale_is_deterministic() {
        let mut img = RgbImage::from_pixel(16, 16, Rgb([180, 90, 40]));
        img.put_pixel(3, 3, Rgb([0, 0, 0]));
        let a = to_gray_canvas(&img, 20);
        let b = to_gray_canvas(&img, 20);
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
