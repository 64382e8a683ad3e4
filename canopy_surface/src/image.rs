// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use kurbo::Rect;

/// Errors reported by [`Surface`](crate::Surface) image draws.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The image has a zero dimension.
    #[error("image has an empty size ({width}x{height})")]
    EmptyImage {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// The pixel buffer length does not match the image size.
    #[error("image buffer holds {actual} bytes, expected {expected}")]
    ImageSize {
        /// `width * height * 4`.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// The image is larger than the backend can address.
    #[error("image of {width}x{height} exceeds backend limits")]
    ImageTooLarge {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// The source rectangle does not overlap the image.
    #[error("source rectangle lies outside the image")]
    EmptySource,
    /// The backend refused to create an image object.
    #[error("backend could not create an image: {0}")]
    ImageCreation(&'static str),
}

/// Borrowed straight-alpha RGBA8 pixels with a validated size.
#[derive(Clone, Copy)]
pub struct ImageView<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl fmt::Debug for ImageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageView")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl<'a> ImageView<'a> {
    /// Wraps `pixels`, checking that it holds exactly `width * height` RGBA8 pixels.
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptyImage { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SurfaceError::ImageTooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(SurfaceError::ImageSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA8 pixels.
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// The rectangle covering the whole image.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Checks that `src` overlaps the image and has a positive area.
    pub fn check_source(&self, src: Rect) -> Result<(), SurfaceError> {
        let overlap = src.abs().intersect(self.bounds());
        if overlap.width() > 0.0 && overlap.height() > 0.0 {
            Ok(())
        } else {
            Err(SurfaceError::EmptySource)
        }
    }
}
