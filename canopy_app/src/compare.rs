// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel comparison between two renders of the same scene.

use kompari::image::{ImageBuffer, Rgba};
use kompari::{Image, ImageDifference, compare_images};

use crate::AppError;
use crate::raster::RasterImage;

const HIGHLIGHT: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Result of [`diff_images`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffReport {
    /// Number of pixels where some channel differs by more than the tolerance.
    pub differing: u64,
    /// The first image dimmed to a quarter of its contrast, with every
    /// differing pixel painted magenta.
    pub highlight: RasterImage,
}

impl DiffReport {
    /// Whether the images matched within tolerance.
    pub fn is_match(&self) -> bool {
        self.differing == 0
    }
}

fn to_image(image: &RasterImage) -> Image {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        Rgba(image.pixel(x, y).unwrap_or_default())
    })
}

fn dimmed(px: &Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = px.0;
    Rgba([192 + r / 4, 192 + g / 4, 192 + b / 4, 255])
}

/// Compares `a` and `b` with `kompari`, then applies a per-channel tolerance.
///
/// A pixel differs when any channel differs by more than `tolerance`.
pub fn diff_images(a: &RasterImage, b: &RasterImage, tolerance: u8) -> Result<DiffReport, AppError> {
    let left = to_image(a);
    let right = to_image(b);
    let highlight = match compare_images(&left, &right) {
        ImageDifference::None => {
            let dim = ImageBuffer::from_fn(left.width(), left.height(), |x, y| {
                dimmed(left.get_pixel(x, y))
            });
            return Ok(DiffReport {
                differing: 0,
                highlight: RasterImage::new(a.width(), a.height(), dim.into_raw())?,
            });
        }
        ImageDifference::Content {
            n_different_pixels, ..
        } => {
            log::debug!("{n_different_pixels} pixel(s) differ before tolerance {tolerance}");
            ImageBuffer::from_fn(left.width(), left.height(), |x, y| {
                let pa = left.get_pixel(x, y);
                let pb = right.get_pixel(x, y);
                if pa.0.iter().zip(pb.0).any(|(l, r)| l.abs_diff(r) > tolerance) {
                    HIGHLIGHT
                } else {
                    dimmed(pa)
                }
            })
        }
        _ => {
            return Err(AppError::SizeMismatch {
                left: (a.width(), a.height()),
                right: (b.width(), b.height()),
            });
        }
    };
    let differing = highlight.pixels().filter(|px| **px == HIGHLIGHT).count() as u64;
    Ok(DiffReport {
        differing,
        highlight: RasterImage::new(a.width(), a.height(), highlight.into_raw())?,
    })
}
