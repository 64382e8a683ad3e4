// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in scenes used by the demo binary and the tests.

use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;

use canopy_scene::{DisplayNode, ImageSprite, Point, ShapeBatchBuilder, Texture, Transform};

/// Size of [`sprite_texture`].
pub const SPRITE_SIZE: (u32, u32) = (26, 37);

/// A small procedural texture: a pale oval with a dark outline on a
/// transparent background.
pub fn sprite_texture() -> Texture {
    let (w, h) = SPRITE_SIZE;
    let (cx, cy) = (f64::from(w) / 2.0, f64::from(h) / 2.0);
    Texture::from_fn(w, h, |x, y| {
        let dx = (f64::from(x) + 0.5 - cx) / cx;
        let dy = (f64::from(y) + 0.5 - cy) / cy;
        let d = dx * dx + dy * dy;
        if d > 1.0 {
            [0, 0, 0, 0]
        } else if d > 0.7 {
            [40, 40, 60, 255]
        } else if y < h / 3 {
            [250, 200, 210, 255]
        } else {
            [245, 245, 250, 255]
        }
    })
}

/// The reference scene: two shapes on the root, and a rotated sub-group
/// with a pivot holding two thick lines, a circle and a sprite.
pub fn demo_scene() -> DisplayNode {
    let mut g1 = ShapeBatchBuilder::new();
    g1.begin_fill(0xFF0000, 1.0)
        .draw_ellipse(0.0, 0.0, 200.0, 100.0)
        .end_fill();
    let g1 = g1
        .into_node()
        .with_transform(Transform::IDENTITY.with_position(200.0, 100.0).with_rotation(30.0));

    let mut g2 = ShapeBatchBuilder::new();
    g2.begin_fill(0x0000FF, 1.0)
        .draw_rect(-50.0, -75.0, 100.0, 150.0)
        .end_fill();
    let g2 = g2
        .into_node()
        .with_transform(Transform::IDENTITY.with_position(120.0, 60.0).with_rotation(15.0));

    // Alpha above 1 is clamped when drawn.
    let mut g3 = ShapeBatchBuilder::new();
    g3.line_style(10.0, 0x000000, 5.0)
        .move_to(0.0, 0.0)
        .line_to(150.0, 100.0)
        .finish_poly();
    let g3 = g3
        .into_node()
        .with_transform(Transform::IDENTITY.with_rotation(-20.0));

    let mut g4 = ShapeBatchBuilder::new();
    g4.line_style(10.0, 0xFFFF00, 5.0)
        .move_to(0.0, 70.0)
        .line_to(150.0, -30.0)
        .finish_poly();
    let g4 = g4
        .into_node()
        .with_transform(Transform::IDENTITY.with_rotation(20.0));

    let mut g5 = ShapeBatchBuilder::new();
    g5.begin_fill(0x00FF00, 1.0)
        .draw_circle(0.0, 0.0, 100.0)
        .end_fill();
    let g5 = g5
        .into_node()
        .with_transform(Transform::IDENTITY.with_position(200.0, 200.0));

    let sprite = DisplayNode::image(
        ImageSprite::new(Arc::new(sprite_texture())).with_anchor(0.5, 0.5),
    )
    .with_transform(
        Transform::IDENTITY
            .with_position(200.0, 200.0)
            .with_uniform_scale(3.0)
            .with_rotation(20.0),
    );

    let sub = DisplayNode::group(vec![g3, g4, g5, sprite]).with_transform(
        Transform::IDENTITY
            .with_pivot(-100.0, -100.0)
            .with_position(75.0, 50.0)
            .with_rotation_radians(FRAC_PI_4),
    );

    DisplayNode::group(vec![g1, g2, sub])
}

/// A second scene exercising every geometry kind with fill and stroke.
pub fn gallery_scene() -> DisplayNode {
    let mut batch = ShapeBatchBuilder::new();
    batch
        .begin_fill(0xFFA500, 0.8)
        .line_style(3.0, 0x333333, 1.0)
        .draw_rounded_rect(20.0, 20.0, 160.0, 100.0, 16.0)
        .begin_fill(0x1E90FF, 1.0)
        .draw_circle(280.0, 70.0, 50.0)
        .begin_fill(0x32CD32, 0.6)
        .draw_ellipse(100.0, 200.0, 80.0, 40.0)
        .begin_fill(0x8A2BE2, 1.0)
        .draw_polygon([
            Point::new(240.0, 160.0),
            Point::new(360.0, 200.0),
            Point::new(260.0, 280.0),
        ])
        .end_fill()
        .line_style(6.0, 0xDC143C, 1.0)
        .move_to(20.0, 280.0)
        .line_to(120.0, 250.0)
        .line_to(200.0, 290.0)
        .finish_poly();
    batch.into_node()
}
