// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The screen rendered through Skia, for comparison with Vello CPU.

use canopy_scene::DisplayNode;
use canopy_surface::{Affine, Surface};
use canopy_surface_skia::SkiaRasterCanvas;
use canopy_translate::shapes::unpack_color;
use canopy_translate::translate;

use crate::AppError;
use crate::config::CanvasConfig;
use crate::raster::RasterImage;

/// Renders `scene` the way [`ScreenRenderer`](crate::ScreenRenderer) does,
/// but on a Skia raster.
pub fn render_screen(config: &CanvasConfig, scene: Option<&DisplayNode>) -> Result<RasterImage, AppError> {
    let (width, height) = config.device_size();
    let mut canvas = SkiaRasterCanvas::new(width, height)?;
    let background = unpack_color(config.background, 1.0);
    canvas.render(Affine::scale(config.device_pixel_ratio), |surface| {
        surface.clear(background);
        if let Some(scene) = scene {
            translate(surface, scene);
        }
    });
    Ok(RasterImage::new(width, height, canvas.to_rgba8()?)?)
}
