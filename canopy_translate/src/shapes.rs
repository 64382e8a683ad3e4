// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape command dispatch.

use canopy_scene::{Geometry, Rgb, ShapeCommand};
use canopy_surface::{Color, Paint, Point, Rect, Surface};

/// Converts a packed `0xRRGGBB` color and a separate opacity into a [`Color`].
///
/// Opacity is clamped to `0.0..=1.0`.
pub fn unpack_color(packed: u32, alpha: f32) -> Color {
    let Rgb { r, g, b } = Rgb::from_packed(packed);
    Color::from_rgb8(r, g, b).with_alpha(alpha.clamp(0.0, 1.0))
}

/// Bounds of an ellipse given its center and radii.
///
/// This is the literal `(x - w, y - h, 2w, 2h)` formula, which covers the
/// whole ellipse because `half_width` and `half_height` are half extents.
pub fn ellipse_bounds(x: f64, y: f64, half_width: f64, half_height: f64) -> Rect {
    Rect::from_origin_size(
        (x - half_width, y - half_height),
        (2.0 * half_width, 2.0 * half_height),
    )
}

/// Draws one shape command: its fill first, then its stroke.
///
/// Either part is skipped when its style does not draw.
pub fn dispatch<S: Surface + ?Sized>(surface: &mut S, command: &ShapeCommand) {
    let ShapeCommand {
        geometry,
        fill,
        stroke,
    } = command;
    if fill.is_drawn() {
        let paint = Paint::fill(unpack_color(fill.color, fill.alpha));
        draw_geometry(surface, geometry, &paint);
    }
    if stroke.is_drawn() {
        let paint = Paint::stroke(unpack_color(stroke.color, stroke.alpha), stroke.width);
        draw_geometry(surface, geometry, &paint);
    }
}

fn draw_geometry<S: Surface + ?Sized>(surface: &mut S, geometry: &Geometry, paint: &Paint) {
    match geometry {
        Geometry::Circle { x, y, radius } => {
            surface.draw_circle(Point::new(*x, *y), *radius, paint);
        }
        Geometry::Ellipse {
            x,
            y,
            half_width,
            half_height,
        } => surface.draw_oval(ellipse_bounds(*x, *y, *half_width, *half_height), paint),
        Geometry::Polygon { points, closed } => {
            if points.is_empty() {
                log::debug!("skipping polygon without points");
                return;
            }
            surface.draw_polygon(points, *closed, paint);
        }
        Geometry::Rectangle {
            x,
            y,
            width,
            height,
        } => surface.draw_rect(
            Rect::from_origin_size((*x, *y), (*width, *height)).abs(),
            paint,
        ),
        Geometry::RoundedRectangle {
            x,
            y,
            width,
            height,
            radius,
        } => surface.draw_round_rect(
            Rect::from_origin_size((*x, *y), (*width, *height)).abs(),
            *radius,
            paint,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use canopy_scene::{FillStyle, StrokeStyle};
    use canopy_surface::PaintStyle;
    use canopy_surface_ref::{RecordingSurface, SurfaceOp};

    fn ops(surface: &RecordingSurface) -> Vec<SurfaceOp> {
        surface.events().iter().map(|e| e.op.clone()).collect()
    }

    #[test]
    fn unpacks_channels_and_alpha() {
        assert_eq!(
            unpack_color(0xFF0000, 1.0).to_rgba8(),
            Color::from_rgba8(255, 0, 0, 255).to_rgba8()
        );
        let green = unpack_color(0x00FF00, 0.5);
        let rgba = green.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0, 255, 0));
        assert_eq!(green.components[3], 0.5);
        assert_eq!(unpack_color(0, 5.0).components[3], 1.0, "alpha is clamped");
    }

    #[test]
    fn fill_precedes_stroke() {
        let mut surface = RecordingSurface::new();
        let cmd = ShapeCommand::new(Geometry::Circle {
            x: 1.0,
            y: 2.0,
            radius: 3.0,
        })
        .with_fill(FillStyle::solid(0x00FF00, 1.0))
        .with_stroke(StrokeStyle::new(4.0, 0x000000, 1.0));
        dispatch(&mut surface, &cmd);

        let ops = ops(&surface);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].paint().map(|p| p.style), Some(PaintStyle::Fill));
        assert_eq!(
            ops[1].paint().map(|p| p.style),
            Some(PaintStyle::Stroke { width: 4.0 })
        );
    }

    #[test]
    fn zero_width_stroke_is_skipped() {
        let mut surface = RecordingSurface::new();
        let cmd = ShapeCommand::new(Geometry::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 5.0,
        })
        .with_fill(FillStyle::solid(0x0000FF, 1.0))
        .with_stroke(StrokeStyle::new(0.0, 0x000000, 1.0));
        dispatch(&mut surface, &cmd);
        assert_eq!(ops(&surface).len(), 1);
    }

    #[test]
    fn stroke_only_command_draws_once() {
        let mut surface = RecordingSurface::new();
        let cmd = ShapeCommand::new(Geometry::Polygon {
            points: vec![Point::new(0.0, 0.0), Point::new(150.0, 100.0)],
            closed: false,
        })
        .with_stroke(StrokeStyle::new(10.0, 0x000000, 1.0));
        dispatch(&mut surface, &cmd);
        let ops = ops(&surface);
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], SurfaceOp::Polygon { closed: false, points, .. } if points.len() == 2));
    }

    #[test]
    fn geometry_maps_to_primitives() {
        let fill = FillStyle::solid(0xFFFFFF, 1.0);
        let mut surface = RecordingSurface::new();
        for geometry in [
            Geometry::Ellipse {
                x: 0.0,
                y: 0.0,
                half_width: 200.0,
                half_height: 100.0,
            },
            Geometry::Rectangle {
                x: -50.0,
                y: -75.0,
                width: 100.0,
                height: 150.0,
            },
            Geometry::RoundedRectangle {
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0,
                radius: 0.5,
            },
        ] {
            dispatch(&mut surface, &ShapeCommand::new(geometry).with_fill(fill));
        }
        let ops = ops(&surface);
        assert!(
            matches!(ops[0], SurfaceOp::Oval { bounds, .. } if bounds == Rect::new(-200.0, -100.0, 200.0, 100.0)),
            "ellipse uses half extents"
        );
        assert!(
            matches!(ops[1], SurfaceOp::Rect { rect, .. } if rect == Rect::new(-50.0, -75.0, 50.0, 75.0)),
            "rect is x, y, w, h"
        );
        assert!(
            matches!(ops[2], SurfaceOp::RoundRect { rect, radius, .. } if rect == Rect::new(1.0, 2.0, 4.0, 6.0) && radius == 0.5),
            "round rect"
        );
    }

    #[test]
    fn ellipse_bounds_span_twice_the_half_extents() {
        assert_eq!(
            ellipse_bounds(0.0, 0.0, 200.0, 100.0),
            Rect::new(-200.0, -100.0, 200.0, 100.0)
        );
        assert_eq!(
            ellipse_bounds(10.0, 20.0, 5.0, 2.0),
            Rect::new(5.0, 18.0, 15.0, 22.0)
        );
    }

    #[test]
    fn empty_polygon_draws_nothing() {
        let mut surface = RecordingSurface::new();
        let cmd = ShapeCommand::new(Geometry::Polygon {
            points: vec![],
            closed: true,
        })
        .with_fill(FillStyle::solid(0xFF0000, 1.0));
        dispatch(&mut surface, &cmd);
        assert!(surface.events().is_empty());
    }

    #[test]
    fn hidden_fill_is_skipped() {
        let mut surface = RecordingSurface::new();
        let cmd = ShapeCommand::new(Geometry::Circle {
            x: 0.0,
            y: 0.0,
            radius: 1.0,
        });
        dispatch(&mut surface, &cmd);
        assert!(surface.events().is_empty());
    }
}
