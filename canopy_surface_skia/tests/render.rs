// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translated scenes rasterized with Skia.

use canopy_scene::{DisplayNode, ShapeBatchBuilder, Transform};
use canopy_surface::{Affine, Color, Surface};
use canopy_surface_skia::SkiaRasterCanvas;
use canopy_translate::translate;

fn pixel(rgba: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
}

fn rotated_rect() -> DisplayNode {
    let mut batch = ShapeBatchBuilder::new();
    batch
        .begin_fill(0x0000FF, 1.0)
        .draw_rect(-10.0, -10.0, 20.0, 20.0);
    batch.into_node().with_transform(
        Transform::IDENTITY
            .with_position(50.0, 50.0)
            .with_rotation(45.0),
    )
}

#[test]
fn rotated_rect_is_a_diamond() {
    let mut canvas = SkiaRasterCanvas::new(100, 100).unwrap();
    canvas.render(Affine::IDENTITY, |surface| {
        surface.clear(Color::WHITE);
        translate(surface, &rotated_rect());
        assert_eq!(surface.save_count(), 0);
    });
    let rgba = canvas.to_rgba8().unwrap();
    // The corner of the rotated square reaches about 14 px above the center.
    assert_eq!(pixel(&rgba, 100, 50, 38), [0, 0, 255, 255]);
    // The unrotated corner position is now outside the shape.
    assert_eq!(pixel(&rgba, 100, 41, 41), [255, 255, 255, 255]);
}

#[test]
fn base_transform_scales_output() {
    let mut canvas = SkiaRasterCanvas::new(200, 200).unwrap();
    canvas.render(Affine::scale(2.0), |surface| {
        surface.clear(Color::WHITE);
        translate(surface, &rotated_rect());
    });
    let rgba = canvas.to_rgba8().unwrap();
    assert_eq!(pixel(&rgba, 200, 100, 100), [0, 0, 255, 255]);
    assert_eq!(pixel(&rgba, 200, 100, 76), [0, 0, 255, 255]);
}
