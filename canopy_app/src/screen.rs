// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_scene::DisplayNode;
use canopy_surface::{Affine, Color, Surface};
use canopy_surface_vello_cpu::{RasterCanvas, RasterError};
use canopy_translate::shapes::unpack_color;
use canopy_translate::translate;

use crate::config::CanvasConfig;
use crate::raster::RasterImage;

/// The on-screen raster.
///
/// The canvas is allocated once at the configured size times the device
/// pixel ratio. Every [`render`](Self::render) redraws it from scratch.
#[derive(Debug)]
pub struct ScreenRenderer {
    canvas: RasterCanvas,
    device_pixel_ratio: f64,
    background: Color,
}

impl ScreenRenderer {
    /// Acquires the raster for `config`.
    pub fn new(config: &CanvasConfig) -> Result<Self, RasterError> {
        let (width, height) = config.device_size();
        Ok(Self {
            canvas: RasterCanvas::new(width, height)?,
            device_pixel_ratio: config.device_pixel_ratio,
            background: unpack_color(config.background, 1.0),
        })
    }

    /// Size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Clears to the background and draws `scene`, if any.
    pub fn render(&mut self, scene: Option<&DisplayNode>) {
        let background = self.background;
        self.canvas
            .render(Affine::scale(self.device_pixel_ratio), |surface| {
                surface.clear(background);
                if let Some(scene) = scene {
                    translate(surface, scene);
                }
            });
        log::debug!(
            "screen rendered at {}x{} ({} nodes)",
            self.canvas.width(),
            self.canvas.height(),
            scene.map_or(0, DisplayNode::node_count)
        );
    }

    /// The last rendered frame.
    pub fn snapshot(&self) -> RasterImage {
        RasterImage::from_canvas(&self.canvas)
    }
}
