// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_surface_vello_cpu --heading-base-level=0

//! Vello CPU–backed implementation of the Canopy surface.
//!
//! [`VelloCpuSurface`] implements [`Surface`] on top of the sparse-strips
//! [`vello_cpu::RenderContext`]. The render context has no save/restore of
//! its own, so the surface keeps the transform stack and sets the context
//! transform before every draw.
//!
//! [`RasterCanvas`] owns a context and a pixmap and renders whole frames.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use canopy_surface::kurbo::{Circle, Ellipse, RoundedRect, Shape};
use canopy_surface::{
    Affine, BezPath, Color, ImageView, PATH_TOLERANCE, Paint, Point, Rect, Surface, SurfaceError,
    image_rect_transform, polygon_path,
};
use vello_cpu::peniko::{Blob, ImageAlphaType, ImageData, ImageFormat, ImageSampler};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext};

/// Errors from creating a [`RasterCanvas`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// The requested size is zero or larger than the renderer supports.
    #[error("cannot create a {width}x{height} raster surface")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// CPU-backed [`Surface`] drawing into a borrowed `vello_cpu` render context.
pub struct VelloCpuSurface<'ctx> {
    /// Underlying Vello CPU render context to draw into.
    pub ctx: &'ctx mut RenderContext,
    base: Affine,
    current: Affine,
    stack: Vec<Affine>,
}

impl fmt::Debug for VelloCpuSurface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VelloCpuSurface { .. }")
    }
}

impl<'ctx> VelloCpuSurface<'ctx> {
    /// Create a surface that renders into the given CPU render context.
    pub fn new(ctx: &'ctx mut RenderContext) -> Self {
        Self::with_base(ctx, Affine::IDENTITY)
    }

    /// Create a surface whose user space is mapped through `base`.
    ///
    /// `base` is typically a device-pixel-ratio scale. [`Surface::clear`]
    /// ignores it.
    pub fn with_base(ctx: &'ctx mut RenderContext, base: Affine) -> Self {
        Self {
            ctx,
            base,
            current: Affine::IDENTITY,
            stack: Vec::new(),
        }
    }

    fn prepare(&mut self, paint: &Paint) {
        self.ctx.set_transform(self.base * self.current);
        self.ctx.set_paint(paint.color);
    }

    fn draw_path(&mut self, path: &BezPath, paint: &Paint) {
        self.prepare(paint);
        match paint.kurbo_stroke() {
            None => self.ctx.fill_path(path),
            Some(stroke) => {
                self.ctx.set_stroke(stroke);
                self.ctx.stroke_path(path);
            }
        }
    }
}

impl Surface for VelloCpuSurface<'_> {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.current = transform;
        }
    }

    fn save_count(&self) -> usize {
        self.stack.len()
    }

    fn concat(&mut self, transform: Affine) {
        self.current *= transform;
    }

    fn clear(&mut self, color: Color) {
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(self.ctx.width()),
            f64::from(self.ctx.height()),
        );
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(color);
        self.ctx.fill_rect(&bounds);
    }

    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        let path = Circle::new(center, radius).to_path(PATH_TOLERANCE);
        self.draw_path(&path, paint);
    }

    fn draw_oval(&mut self, bounds: Rect, paint: &Paint) {
        let path = Ellipse::from_rect(bounds).to_path(PATH_TOLERANCE);
        self.draw_path(&path, paint);
    }

    fn draw_polygon(&mut self, points: &[Point], closed: bool, paint: &Paint) {
        let path = polygon_path(points, closed);
        self.draw_path(&path, paint);
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.prepare(paint);
        match paint.kurbo_stroke() {
            None => self.ctx.fill_rect(&rect),
            Some(stroke) => {
                self.ctx.set_stroke(stroke);
                self.ctx.stroke_rect(&rect);
            }
        }
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        let path = RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE);
        self.draw_path(&path, paint);
    }

    fn draw_image_rect(
        &mut self,
        image: ImageView<'_>,
        src: Rect,
        dst: Rect,
    ) -> Result<(), SurfaceError> {
        image.check_source(src)?;
        let (width, height) = (image.width(), image.height());
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(SurfaceError::ImageTooLarge { width, height });
        }
        if dst.width() == 0.0 || dst.height() == 0.0 {
            return Ok(());
        }

        let image_data = ImageData {
            data: Blob::from(image.pixels().to_vec()),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width,
            height,
        };
        let image_paint = CpuImage {
            image: ImageSource::from_peniko_image_data(&image_data),
            sampler: ImageSampler::default(),
        };

        // Clip to dst in the current transform, then paint src through the
        // src-to-dst mapping.
        let ctm = self.base * self.current;
        self.ctx.set_transform(ctm);
        self.ctx.push_clip_layer(&dst.to_path(PATH_TOLERANCE));
        self.ctx.set_transform(ctm * image_rect_transform(src, dst));
        self.ctx.set_paint(image_paint);
        self.ctx.fill_rect(&src);
        self.ctx.pop_layer();
        self.ctx.set_transform(ctm);
        Ok(())
    }
}

/// A render context plus the pixmap it renders into.
pub struct RasterCanvas {
    ctx: RenderContext,
    pixmap: Pixmap,
}

impl fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("width", &self.ctx.width())
            .field("height", &self.ctx.height())
            .finish_non_exhaustive()
    }
}

impl RasterCanvas {
    /// Create a canvas of `width` x `height` device pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let invalid = RasterError::InvalidSize { width, height };
        let w = u16::try_from(width).map_err(|_| invalid.clone())?;
        let h = u16::try_from(height).map_err(|_| invalid.clone())?;
        if w == 0 || h == 0 {
            return Err(invalid);
        }
        Ok(Self {
            ctx: RenderContext::new(w, h),
            pixmap: Pixmap::new(w, h),
        })
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.ctx.width())
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.ctx.height())
    }

    /// Renders one frame.
    ///
    /// The context is reset, `draw` runs against a fresh [`VelloCpuSurface`]
    /// whose user space is mapped through `base`, and the result replaces the
    /// pixmap contents.
    pub fn render<R>(&mut self, base: Affine, draw: impl FnOnce(&mut VelloCpuSurface<'_>) -> R) -> R {
        self.ctx.reset();
        let out = {
            let mut surface = VelloCpuSurface::with_base(&mut self.ctx, base);
            draw(&mut surface)
        };
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);
        out
    }

    /// The last rendered frame as unpremultiplied RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .clone()
            .take_unpremultiplied()
            .into_iter()
            .flat_map(|px| px.to_u8_array())
            .collect()
    }
}
