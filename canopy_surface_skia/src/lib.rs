// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_surface_skia --heading-base-level=0

//! Skia implementation of the Canopy surface.
//!
//! [`SkiaSurface`] forwards state changes to a borrowed [`skia_safe::Canvas`]
//! and converts shapes and paints as they are drawn. [`SkiaRasterCanvas`]
//! owns a CPU raster surface and renders whole frames.

use canopy_surface::kurbo::PathEl;
use canopy_surface::{
    Affine, BezPath, Color, ImageView, Paint, PaintStyle, Point, Rect, Surface, SurfaceError,
    polygon_path,
};
use core::fmt;
use skia_safe as sk;

/// Errors from creating or reading a [`SkiaRasterCanvas`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkiaError {
    /// Skia could not allocate a raster surface of this size.
    #[error("cannot create a {width}x{height} Skia raster surface")]
    SurfaceCreation {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Reading pixels back from the surface failed.
    #[error("failed to read pixels from the Skia surface")]
    ReadPixels,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Skia APIs consume f32; truncation from f64 geometry is acceptable"
)]
fn f64_to_f32(v: f64) -> f32 {
    v as f32
}

fn affine_to_matrix(xf: Affine) -> sk::Matrix {
    let a = xf.as_coeffs();
    // kurbo: [a c e; b d f], skia: [sx kx tx; ky sy ty].
    sk::Matrix::new_all(
        f64_to_f32(a[0]),
        f64_to_f32(a[2]),
        f64_to_f32(a[4]),
        f64_to_f32(a[1]),
        f64_to_f32(a[3]),
        f64_to_f32(a[5]),
        0.0,
        0.0,
        1.0,
    )
}

fn to_sk_rect(rect: Rect) -> sk::Rect {
    sk::Rect::new(
        f64_to_f32(rect.x0),
        f64_to_f32(rect.y0),
        f64_to_f32(rect.x1),
        f64_to_f32(rect.y1),
    )
}

fn to_sk_point(p: Point) -> sk::Point {
    sk::Point::new(f64_to_f32(p.x), f64_to_f32(p.y))
}

fn to_sk_path(path: &BezPath) -> sk::Path {
    let mut out = sk::Path::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.move_to(to_sk_point(p));
            }
            PathEl::LineTo(p) => {
                out.line_to(to_sk_point(p));
            }
            PathEl::QuadTo(c, p) => {
                out.quad_to(to_sk_point(c), to_sk_point(p));
            }
            PathEl::CurveTo(c1, c2, p) => {
                out.cubic_to(to_sk_point(c1), to_sk_point(c2), to_sk_point(p));
            }
            PathEl::ClosePath => {
                out.close();
            }
        }
    }
    out
}

fn color_to_sk_color(color: Color) -> sk::Color {
    let rgba = color.to_rgba8();
    sk::Color::from_argb(rgba.a, rgba.r, rgba.g, rgba.b)
}

fn to_sk_paint(paint: &Paint) -> sk::Paint {
    let mut out = sk::Paint::default();
    out.set_anti_alias(true);
    out.set_color(color_to_sk_color(paint.color));
    match paint.style {
        PaintStyle::Fill => {
            out.set_style(sk::PaintStyle::Fill);
        }
        PaintStyle::Stroke { width } => {
            out.set_style(sk::PaintStyle::Stroke);
            out.set_stroke_width(f64_to_f32(width));
            out.set_stroke_join(sk::PaintJoin::Round);
            out.set_stroke_cap(sk::PaintCap::Butt);
        }
    }
    out
}

/// Skia-backed [`Surface`] drawing into a borrowed canvas.
///
/// Restores never pop below the canvas save count at construction time.
pub struct SkiaSurface<'a> {
    canvas: &'a sk::Canvas,
    base_save_count: usize,
}

impl fmt::Debug for SkiaSurface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SkiaSurface { .. }")
    }
}

impl<'a> SkiaSurface<'a> {
    /// Create a surface that draws into `canvas` with its current matrix.
    pub fn new(canvas: &'a sk::Canvas) -> Self {
        Self {
            canvas,
            base_save_count: canvas.save_count(),
        }
    }
}

impl Surface for SkiaSurface<'_> {
    fn save(&mut self) {
        self.canvas.save();
    }

    fn restore(&mut self) {
        if self.canvas.save_count() > self.base_save_count {
            self.canvas.restore();
        }
    }

    fn save_count(&self) -> usize {
        self.canvas.save_count().saturating_sub(self.base_save_count)
    }

    fn concat(&mut self, transform: Affine) {
        self.canvas.concat(&affine_to_matrix(transform));
    }

    fn clear(&mut self, color: Color) {
        self.canvas.clear(color_to_sk_color(color));
    }

    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.canvas
            .draw_circle(to_sk_point(center), f64_to_f32(radius), &to_sk_paint(paint));
    }

    fn draw_oval(&mut self, bounds: Rect, paint: &Paint) {
        self.canvas.draw_oval(to_sk_rect(bounds), &to_sk_paint(paint));
    }

    fn draw_polygon(&mut self, points: &[Point], closed: bool, paint: &Paint) {
        let path = to_sk_path(&polygon_path(points, closed));
        self.canvas.draw_path(&path, &to_sk_paint(paint));
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.canvas.draw_rect(to_sk_rect(rect), &to_sk_paint(paint));
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        let r = f64_to_f32(radius);
        self.canvas
            .draw_round_rect(to_sk_rect(rect), r, r, &to_sk_paint(paint));
    }

    fn draw_image_rect(
        &mut self,
        image: ImageView<'_>,
        src: Rect,
        dst: Rect,
    ) -> Result<(), SurfaceError> {
        image.check_source(src)?;
        let (width, height) = (image.width(), image.height());
        let too_large = SurfaceError::ImageTooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large.clone())?;
        let h = i32::try_from(height).map_err(|_| too_large)?;
        let info = sk::ImageInfo::new(
            (w, h),
            sk::ColorType::RGBA8888,
            sk::AlphaType::Unpremul,
            None,
        );
        let data = sk::Data::new_copy(image.pixels());
        let row_bytes = width as usize * 4;
        let sk_image = sk::images::raster_from_data(&info, data, row_bytes)
            .ok_or(SurfaceError::ImageCreation("Skia rejected the image data"))?;

        let mut paint = sk::Paint::default();
        paint.set_anti_alias(true);
        self.canvas.draw_image_rect(
            &sk_image,
            Some((&to_sk_rect(src), sk::canvas::SrcRectConstraint::Strict)),
            to_sk_rect(dst),
            &paint,
        );
        Ok(())
    }
}

/// A CPU raster surface that renders whole frames through [`SkiaSurface`].
pub struct SkiaRasterCanvas {
    surface: sk::Surface,
    width: u32,
    height: u32,
}

impl fmt::Debug for SkiaRasterCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkiaRasterCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl SkiaRasterCanvas {
    /// Create a canvas of `width` x `height` device pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, SkiaError> {
        let invalid = SkiaError::SurfaceCreation { width, height };
        let w = i32::try_from(width).map_err(|_| invalid.clone())?;
        let h = i32::try_from(height).map_err(|_| invalid.clone())?;
        if w == 0 || h == 0 {
            return Err(invalid);
        }
        let surface = sk::surfaces::raster_n32_premul((w, h)).ok_or(invalid)?;
        Ok(Self {
            surface,
            width,
            height,
        })
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Renders one frame.
    ///
    /// The canvas is cleared to transparent, `base` is applied, and `draw`
    /// runs against a [`SkiaSurface`]. Any saves `draw` leaves open are
    /// discarded.
    pub fn render<R>(&mut self, base: Affine, draw: impl FnOnce(&mut SkiaSurface<'_>) -> R) -> R {
        let canvas = self.surface.canvas();
        let initial = canvas.save_count();
        canvas.clear(sk::Color::TRANSPARENT);
        canvas.save();
        canvas.concat(&affine_to_matrix(base));
        let out = draw(&mut SkiaSurface::new(canvas));
        canvas.restore_to_count(initial);
        out
    }

    /// The last rendered frame as unpremultiplied RGBA8 bytes.
    pub fn to_rgba8(&mut self) -> Result<Vec<u8>, SkiaError> {
        let (w, h) = (self.width as usize, self.height as usize);
        let info = sk::ImageInfo::new(
            (self.surface.width(), self.surface.height()),
            sk::ColorType::RGBA8888,
            sk::AlphaType::Unpremul,
            None,
        );
        let image = self.surface.image_snapshot();
        let mut bytes = vec![0_u8; w * h * 4];
        let ok = image.read_pixels(
            &info,
            bytes.as_mut_slice(),
            w * 4,
            (0, 0),
            sk::image::CachingHint::Disallow,
        );
        if ok { Ok(bytes) } else { Err(SkiaError::ReadPixels) }
    }
}
