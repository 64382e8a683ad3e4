// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_scene::DisplayNode;
use canopy_surface::{Affine, Color, Rect, Surface};
use canopy_surface_vello_cpu::RasterCanvas;
use canopy_translate::shapes::unpack_color;
use canopy_translate::translate;

use crate::AppError;
use crate::config::{CanvasConfig, ThumbnailConfig};
use crate::raster::RasterImage;

/// Renders small previews of scenes.
///
/// Each preview is drawn at full canvas size offscreen and then scaled into
/// the preview through [`Surface::draw_image_rect`]. Both rasters live only
/// for the duration of [`render`](Self::render).
#[derive(Clone, Debug)]
pub struct ThumbnailRenderer {
    source: CanvasConfig,
    width: u32,
    height: u32,
    background: Color,
}

impl ThumbnailRenderer {
    /// A renderer for scenes laid out on `canvas`, producing previews of
    /// `thumbnail` size.
    pub fn new(canvas: &CanvasConfig, thumbnail: &ThumbnailConfig) -> Self {
        Self {
            source: canvas.clone(),
            width: thumbnail.width,
            height: thumbnail.height,
            background: unpack_color(canvas.background, 1.0),
        }
    }

    /// Preview size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Renders one preview of `scene`.
    pub fn render(&self, scene: &DisplayNode) -> Result<RasterImage, AppError> {
        let (width, height) = self.source.device_size();
        let mut offscreen = RasterCanvas::new(width, height)?;
        let background = self.background;
        offscreen.render(Affine::scale(self.source.device_pixel_ratio), |surface| {
            surface.clear(background);
            translate(surface, scene);
        });
        let full = RasterImage::from_canvas(&offscreen);
        drop(offscreen);

        let mut preview = RasterCanvas::new(self.width, self.height)?;
        let dst = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        let view = full.view()?;
        preview.render(Affine::IDENTITY, |surface| {
            surface.clear(background);
            surface.draw_image_rect(view, view.bounds(), dst)
        })?;
        Ok(RasterImage::from_canvas(&preview))
    }

    /// One preview per scene, in order.
    pub fn render_all<'a>(
        &self,
        scenes: impl IntoIterator<Item = &'a DisplayNode>,
    ) -> Result<Vec<RasterImage>, AppError> {
        let thumbnails = scenes
            .into_iter()
            .map(|scene| self.render(scene))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("rendered {} thumbnail(s)", thumbnails.len());
        Ok(thumbnails)
    }
}
