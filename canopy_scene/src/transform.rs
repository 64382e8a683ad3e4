// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Local transform of a [`DisplayNode`](crate::DisplayNode).
///
/// The pivot is expressed in the node's own coordinates and ends up at
/// `position` in the parent's coordinates; rotation and scale act around it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in parent coordinates.
    pub position: Point,
    /// Local point that maps onto `position`.
    pub pivot: Point,
    /// Clockwise rotation in degrees (y-down coordinates).
    pub rotation: f64,
    /// Scale factors along the local axes.
    pub scale: Vec2,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        position: Point::ORIGIN,
        pivot: Point::ORIGIN,
        rotation: 0.0,
        scale: Vec2::new(1.0, 1.0),
    };

    /// Returns a copy with the given position.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Returns a copy with the given pivot.
    #[must_use]
    pub fn with_pivot(mut self, x: f64, y: f64) -> Self {
        self.pivot = Point::new(x, y);
        self
    }

    /// Returns a copy with the given rotation, in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Returns a copy with the given rotation, in radians.
    #[must_use]
    pub fn with_rotation_radians(self, radians: f64) -> Self {
        self.with_rotation(radians.to_degrees())
    }

    /// Returns a copy with the given per-axis scale.
    #[must_use]
    pub fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    /// Returns a copy with the same scale on both axes.
    #[must_use]
    pub fn with_uniform_scale(self, s: f64) -> Self {
        self.with_scale(s, s)
    }

    /// Returns `true` if applying this transform changes nothing.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert!(Transform::default().is_identity(), "default must be identity");
        assert!(
            !Transform::IDENTITY.with_rotation(30.0).is_identity(),
            "rotated transform is not identity"
        );
    }

    #[test]
    fn radians_are_stored_as_degrees() {
        let t = Transform::IDENTITY.with_rotation_radians(core::f64::consts::FRAC_PI_4);
        assert!((t.rotation - 45.0).abs() < 1e-9, "pi/4 should be 45 degrees");
    }
}
