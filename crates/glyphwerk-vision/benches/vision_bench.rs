// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the glyphwerk-vision segmentation pipeline.
// Benchmarks Otsu thresholding and region extraction on a synthetic
// four-letter CAPTCHA canvas.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use glyphwerk_core::SolverConfig;
use glyphwerk_vision::{binarize_inverted, extract_regions, otsu_threshold, to_gray_canvas};

/// Build a 160x60 synthetic CAPTCHA: light background with four dark
/// letter-sized blobs, the same pattern used by the unit tests.
fn synthetic_captcha() -> RgbImage {
    let mut img = RgbImage::from_pixel(160, 60, Rgb([235, 235, 235]));
    for (i, x0) in [15u32, 55, 95, 135].iter().enumerate() {
        for y in 18..40 {
            for x in *x0..*x0 + 10 + i as u32 {
                img.put_pixel(x, y, Rgb([25, 25, 25]));
            }
        }
    }
    img
}

fn bench_otsu(c: &mut Criterion) {
    let canvas = to_gray_canvas(&synthetic_captcha(), 20);
    c.bench_function("otsu_threshold (200x100)", |b| {
        b.iter(|| black_box(otsu_threshold(black_box(&canvas))));
    });
}

fn bench_segmentation(c: &mut Criterion) {
    let canvas = to_gray_canvas(&synthetic_captcha(), 20);
    let config = SolverConfig::default();
    c.bench_function("binarize + extract_regions (200x100)", |b| {
        b.iter(|| {
            let mask = binarize_inverted(black_box(&canvas));
            black_box(extract_regions(&mask, &config).expect("four regions"));
        });
    });
}

fn bench_mask_only(c: &mut Criterion) {
    let mask = {
        let canvas = to_gray_canvas(&synthetic_captcha(), 20);
        binarize_inverted(&canvas)
    };
    let config = SolverConfig::default();
    c.bench_function("extract_regions (precomputed mask)", |b| {
        b.iter(|| black_box(extract_regions(black_box(&mask), &config).expect("four regions")));
    });
}

criterion_group!(benches, bench_otsu, bench_segmentation, bench_mask_only);
criterion_main!(benches);
