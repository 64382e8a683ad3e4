// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node transform composition.

use canopy_scene::Transform;
use canopy_surface::{Affine, Surface};

/// Applies `transform` to the surface's current transform.
///
/// Emits, in order: `translate(position)`, `rotate(rotation)` (converted to
/// radians), `scale(scale)`, `translate(-pivot)`. The result equals
/// [`local_transform`]: a local point `p` lands at
/// `position + R * S * (p - pivot)` in the parent's space.
///
/// The caller owns the surrounding save/restore.
pub fn apply_transform<S: Surface + ?Sized>(surface: &mut S, transform: &Transform) {
    let Transform {
        position,
        pivot,
        rotation,
        scale,
    } = *transform;
    surface.translate(position.x, position.y);
    surface.rotate(rotation.to_radians());
    surface.scale(scale.x, scale.y);
    surface.translate(-pivot.x, -pivot.y);
}

/// The matrix that [`apply_transform`] post-multiplies onto a surface.
pub fn local_transform(transform: &Transform) -> Affine {
    Affine::translate(transform.position.to_vec2())
        * Affine::rotate(transform.rotation.to_radians())
        * Affine::scale_non_uniform(transform.scale.x, transform.scale.y)
        * Affine::translate(-transform.pivot.to_vec2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use canopy_scene::Point;
    use canopy_surface_ref::{RecordingSurface, SurfaceOp};

    #[test]
    fn emits_calls_in_fixed_order() {
        let mut surface = RecordingSurface::new();
        let t = Transform::IDENTITY
            .with_position(75.0, 50.0)
            .with_pivot(-100.0, -100.0)
            .with_rotation(45.0)
            .with_scale(2.0, 3.0);
        apply_transform(&mut surface, &t);

        let ops: Vec<_> = surface.events().iter().map(|e| e.op.clone()).collect();
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], SurfaceOp::Translate { dx: 75.0, dy: 50.0 });
        assert!(
            matches!(ops[1], SurfaceOp::Rotate { radians } if (radians - core::f64::consts::FRAC_PI_4).abs() < 1e-12),
            "rotation is converted to radians"
        );
        assert_eq!(ops[2], SurfaceOp::Scale { sx: 2.0, sy: 3.0 });
        assert_eq!(
            ops[3],
            SurfaceOp::Translate {
                dx: 100.0,
                dy: 100.0
            }
        );
    }

    #[test]
    fn emitted_calls_match_local_transform() {
        let mut surface = RecordingSurface::new();
        let t = Transform::IDENTITY
            .with_position(10.0, -4.0)
            .with_pivot(3.0, 7.0)
            .with_rotation(-20.0)
            .with_scale(0.5, 1.5);
        apply_transform(&mut surface, &t);

        let expected = local_transform(&t);
        let actual = surface.state().transform;
        for (a, e) in actual.as_coeffs().iter().zip(expected.as_coeffs()) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn pivot_lands_on_position() {
        let t = Transform::IDENTITY
            .with_position(200.0, 200.0)
            .with_pivot(13.0, 18.5)
            .with_rotation(20.0)
            .with_uniform_scale(3.0);
        let p = local_transform(&t) * Point::new(13.0, 18.5);
        assert!((p - Point::new(200.0, 200.0)).hypot() < 1e-9, "{p:?}");
    }
}
