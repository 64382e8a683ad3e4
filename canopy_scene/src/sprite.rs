// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use kurbo::{Point, Rect};

/// Decoded pixels shared between sprites.
///
/// Pixels are straight (non-premultiplied) RGBA8, row-major, without padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Texture {
    /// Wraps an RGBA8 buffer.
    ///
    /// The buffer is not checked here; see [`Texture::is_available`].
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Builds a texture by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns `true` if the texture has a non-empty size and a buffer of
    /// exactly `width * height * 4` bytes.
    pub fn is_available(&self) -> bool {
        self.width > 0
            && self.height > 0
            && (self.width as usize)
                .checked_mul(self.height as usize)
                .and_then(|n| n.checked_mul(4))
                == Some(self.pixels.len())
    }

    /// The rectangle covering the whole texture.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// A leaf that shows a frame of a texture.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSprite {
    /// Backing texture. `None` when the source never loaded.
    pub texture: Option<Arc<Texture>>,
    /// Source rectangle in texture pixels.
    pub frame: Rect,
    /// Placement origin as a fraction of the frame size; `(0.5, 0.5)` centers the frame.
    pub anchor: Point,
    /// Whether the texture reference is usable. Invalid sprites are skipped.
    pub valid: bool,
}

impl ImageSprite {
    /// A sprite showing the whole texture, anchored at its top-left corner.
    pub fn new(texture: Arc<Texture>) -> Self {
        Self {
            frame: texture.bounds(),
            texture: Some(texture),
            anchor: Point::ORIGIN,
            valid: true,
        }
    }

    /// A sprite whose source is missing.
    pub fn missing(frame: Rect) -> Self {
        Self {
            texture: None,
            frame,
            anchor: Point::ORIGIN,
            valid: true,
        }
    }

    /// Returns the sprite with the given anchor.
    #[must_use]
    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    /// Returns the sprite cropped to `frame`.
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    /// Returns the sprite with its validity flag set.
    #[must_use]
    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn availability_checks_buffer_length() {
        assert!(Texture::new(2, 2, vec![0_u8; 16]).is_available(), "exact");
        assert!(!Texture::new(2, 2, vec![0_u8; 15]).is_available(), "short");
        assert!(!Texture::new(0, 2, vec![0_u8; 0]).is_available(), "empty");
    }

    #[test]
    fn from_fn_fills_row_major() {
        let t = Texture::from_fn(2, 1, |x, _| [u8::try_from(x).unwrap(), 0, 0, 255]);
        assert_eq!(t.pixels(), &[0, 0, 0, 255, 1, 0, 0, 255], "pixels");
    }

    #[test]
    fn new_sprite_frames_the_whole_texture() {
        let t = Arc::new(Texture::new(26, 37, vec![0_u8; 26 * 37 * 4]));
        let s = ImageSprite::new(t).with_anchor(0.5, 0.5);
        assert_eq!(s.frame, Rect::new(0.0, 0.0, 26.0, 37.0), "frame");
        assert!(s.valid, "valid by default");
    }
}
