// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_translate --heading-base-level=0

//! Canopy Translate: replays display trees onto drawing surfaces.
//!
//! [`translate`] walks a [`DisplayNode`] depth-first and issues calls on any
//! [`Surface`]:
//!
//! - Each node is drawn inside its own save/restore pair, with its
//!   [`Transform`](canopy_scene::Transform) applied by
//!   [`compositor::apply_transform`].
//! - Groups recurse into their children in order.
//! - Shape batches go through [`shapes::dispatch`], fill before stroke.
//! - Sprites draw their frame through [`Surface::draw_image_rect`].
//!
//! The tree is only borrowed; translating it again produces the same calls.
//! Sprites that cannot be drawn are logged and skipped, so one bad leaf
//! never aborts the rest of the scene.
//!
//! ## Example
//!
//! ```
//! use canopy_scene::{DisplayNode, ShapeBatchBuilder, Transform};
//! use canopy_surface::Surface;
//! use canopy_surface_ref::RecordingSurface;
//!
//! let mut batch = ShapeBatchBuilder::new();
//! batch.begin_fill(0x00ff00, 1.0).draw_circle(0.0, 0.0, 100.0);
//! let scene = batch
//!     .into_node()
//!     .with_transform(Transform::IDENTITY.with_position(200.0, 200.0));
//!
//! let mut surface = RecordingSurface::new();
//! canopy_translate::translate(&mut surface, &scene);
//! assert_eq!(surface.draws().count(), 1);
//! assert_eq!(surface.save_count(), 0);
//! ```

#![no_std]

extern crate alloc;

pub mod compositor;
pub mod shapes;

use canopy_scene::{DisplayNode, ImageSprite, NodeKind};
use canopy_surface::{ImageView, Point, Rect, Surface, SurfaceExt};

/// Replays `node` and its subtree onto `surface`.
///
/// The surface's save depth is the same before and after the call.
pub fn translate<S: Surface + ?Sized>(surface: &mut S, node: &DisplayNode) {
    surface.with_save(|surface| {
        compositor::apply_transform(surface, &node.transform);
        match &node.kind {
            NodeKind::Group(children) => {
                for child in children {
                    translate(surface, child);
                }
            }
            NodeKind::Shapes(commands) => {
                for command in commands {
                    shapes::dispatch(surface, command);
                }
            }
            NodeKind::Image(sprite) => draw_sprite(surface, sprite),
        }
    });
}

/// Where a sprite's frame is placed in the sprite's local space.
///
/// The anchor is a fraction of the frame size: `(0, 0)` puts the frame's
/// top-left corner at the origin, `(0.5, 0.5)` centers it.
pub fn sprite_destination(frame: Rect, anchor: Point) -> Rect {
    let (w, h) = (frame.width(), frame.height());
    Rect::from_origin_size((-anchor.x * w, -anchor.y * h), (w, h))
}

fn draw_sprite<S: Surface + ?Sized>(surface: &mut S, sprite: &ImageSprite) {
    if !sprite.valid {
        log::debug!("skipping sprite with an invalid texture");
        return;
    }
    let Some(texture) = sprite.texture.as_deref() else {
        log::warn!("sprite has no texture source; skipping");
        return;
    };
    let image = match ImageView::new(texture.width(), texture.height(), texture.pixels()) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("sprite texture is unavailable: {err}");
            return;
        }
    };
    let frame = sprite.frame;
    if frame.width() <= 0.0 || frame.height() <= 0.0 {
        log::warn!("sprite frame {frame:?} is empty; skipping");
        return;
    }
    let dst = sprite_destination(frame, sprite.anchor);
    if let Err(err) = surface.draw_image_rect(image, frame, dst) {
        log::warn!("failed to draw sprite: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec;
    use canopy_scene::Texture;
    use canopy_surface_ref::{RecordingSurface, SurfaceOp};

    fn texture(w: u32, h: u32) -> Arc<Texture> {
        Arc::new(Texture::from_fn(w, h, |x, y| {
            [u8::try_from(x % 256).unwrap(), u8::try_from(y % 256).unwrap(), 0, 255]
        }))
    }

    #[test]
    fn anchor_offsets_destination() {
        let frame = Rect::new(0.0, 0.0, 26.0, 37.0);
        assert_eq!(
            sprite_destination(frame, Point::new(0.5, 0.5)),
            Rect::new(-13.0, -18.5, 13.0, 18.5)
        );
        assert_eq!(
            sprite_destination(frame, Point::ORIGIN),
            Rect::new(0.0, 0.0, 26.0, 37.0)
        );
    }

    #[test]
    fn sprite_draws_frame_into_anchored_rect() {
        let sprite = ImageSprite::new(texture(8, 4))
            .with_frame(Rect::new(2.0, 0.0, 6.0, 4.0))
            .with_anchor(1.0, 0.0);
        let mut surface = RecordingSurface::new();
        translate(&mut surface, &DisplayNode::image(sprite));

        let draws: vec::Vec<_> = surface.draws().collect();
        assert_eq!(draws.len(), 1);
        assert_eq!(
            draws[0].op,
            SurfaceOp::ImageRect {
                width: 8,
                height: 4,
                src: Rect::new(2.0, 0.0, 6.0, 4.0),
                dst: Rect::new(-4.0, 0.0, 0.0, 4.0),
            }
        );
        assert_eq!(draws[0].state.save_depth, 1, "drawn inside the node scope");
    }

    #[test]
    fn unusable_sprites_are_skipped() {
        let cases = [
            ImageSprite::new(texture(2, 2)).with_valid(false),
            ImageSprite::missing(Rect::new(0.0, 0.0, 4.0, 4.0)),
            ImageSprite::new(Arc::new(Texture::new(2, 2, vec![0_u8; 3]))),
            ImageSprite::new(texture(2, 2)).with_frame(Rect::ZERO),
        ];
        for sprite in cases {
            let mut surface = RecordingSurface::new();
            translate(&mut surface, &DisplayNode::image(sprite));
            assert_eq!(surface.draws().count(), 0);
            assert_eq!(surface.save_count(), 0);
        }
    }

    #[test]
    fn failed_image_draw_does_not_stop_siblings() {
        let mut batch = canopy_scene::ShapeBatchBuilder::new();
        batch.begin_fill(0xFF0000, 1.0).draw_rect(0.0, 0.0, 1.0, 1.0);
        let scene = DisplayNode::group(vec![
            DisplayNode::image(ImageSprite::new(texture(2, 2))),
            batch.into_node(),
        ]);

        let mut surface = RecordingSurface::new();
        surface.reject_images(true);
        translate(&mut surface, &scene);
        let draws: vec::Vec<_> = surface.draws().map(|e| e.op.clone()).collect();
        assert_eq!(draws.len(), 1);
        assert!(matches!(draws[0], SurfaceOp::Rect { .. }));
        assert_eq!(surface.save_count(), 0);
    }
}
