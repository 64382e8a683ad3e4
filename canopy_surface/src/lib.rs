// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_surface --heading-base-level=0

//! Canopy Surface: the immediate-mode drawing target Canopy renders onto.
//!
//! A [`Surface`] is a canvas with a save/restore stack and a small set of
//! primitives. Each shape draw receives a fresh [`Paint`]; surfaces keep no
//! paint state between calls. The current transform is the only state that
//! [`Surface::save`] and [`Surface::restore`] track.
//!
//! # Position in the stack
//!
//! - **Scene model**: `canopy_scene` describes what to draw.
//! - **Translation**: `canopy_translate` walks a scene and calls into a
//!   [`Surface`].
//! - **Backends**: `canopy_surface_ref` (recording), `canopy_surface_vello_cpu`
//!   (CPU raster), `canopy_surface_pdf` (PDF pages) and `canopy_surface_skia`
//!   (Skia raster) implement [`Surface`].
//!
//! # Conventions
//!
//! - Coordinates are y-down. [`Surface::rotate`] takes radians, positive
//!   values rotate clockwise on screen.
//! - Transform helpers post-multiply: `translate` then `rotate` rotates
//!   around the translated origin.
//! - Strokes use round joins and butt caps on every backend.
//! - [`Surface::clear`] ignores the current transform and fills the whole
//!   target.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod image;
mod paint;
mod path;

pub use image::{ImageView, SurfaceError};
pub use paint::{Paint, PaintStyle};
pub use path::{PATH_TOLERANCE, image_rect_transform, polygon_path};

pub use kurbo::{self, Affine, BezPath, Point, Rect};
pub use peniko::{self, Color};

/// An immediate-mode 2-D drawing target.
///
/// The trait is object safe, so translators can drive `&mut dyn Surface`.
pub trait Surface {
    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops the most recent [`save`](Self::save).
    ///
    /// Restoring with no outstanding save leaves the surface unchanged.
    fn restore(&mut self);

    /// Number of outstanding saves.
    fn save_count(&self) -> usize;

    /// Post-multiplies the current transform by `transform`.
    fn concat(&mut self, transform: Affine);

    /// Translates the current transform.
    fn translate(&mut self, dx: f64, dy: f64) {
        self.concat(Affine::translate((dx, dy)));
    }

    /// Rotates the current transform by `radians` around the local origin.
    fn rotate(&mut self, radians: f64) {
        self.concat(Affine::rotate(radians));
    }

    /// Scales the current transform.
    fn scale(&mut self, sx: f64, sy: f64) {
        self.concat(Affine::scale_non_uniform(sx, sy));
    }

    /// Fills the whole target with `color`, regardless of the current transform.
    fn clear(&mut self, color: Color);

    /// Draws a circle.
    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Draws the ellipse inscribed in `bounds`.
    fn draw_oval(&mut self, bounds: Rect, paint: &Paint);

    /// Draws a polyline through `points`, closing it if `closed`.
    fn draw_polygon(&mut self, points: &[Point], closed: bool, paint: &Paint);

    /// Draws an axis-aligned rectangle.
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    /// Draws a rectangle with equal circular corner radii.
    fn draw_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint);

    /// Draws the `src` region of `image` (in image pixels) into `dst`.
    ///
    /// Any backend image object created for this call is released before
    /// returning.
    fn draw_image_rect(
        &mut self,
        image: ImageView<'_>,
        src: Rect,
        dst: Rect,
    ) -> Result<(), SurfaceError>;
}

/// Convenience helpers for [`Surface`] implementations and callers.
///
/// This is separate from [`Surface`] so that methods can accept closures
/// without complicating trait object usage (`&mut dyn Surface`).
pub trait SurfaceExt: Surface {
    /// Runs `f` between a [`save`](Surface::save) and the matching
    /// [`restore`](Surface::restore).
    ///
    /// Note: if `f` panics, the surface will not be restored.
    #[inline]
    fn with_save<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.save();
        let out = f(self);
        self.restore();
        out
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}
