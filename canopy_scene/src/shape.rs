// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use kurbo::Point;

/// Fill style of a shape command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillStyle {
    /// Packed `0xRRGGBB` color.
    pub color: u32,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
    /// Whether the fill is painted at all.
    pub visible: bool,
}

impl FillStyle {
    /// No fill.
    pub const NONE: Self = Self {
        color: 0,
        alpha: 1.0,
        visible: false,
    };

    /// A visible solid fill.
    pub const fn solid(color: u32, alpha: f32) -> Self {
        Self {
            color,
            alpha,
            visible: true,
        }
    }

    /// Returns `true` if this fill produces a draw call.
    pub const fn is_drawn(&self) -> bool {
        self.visible
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Stroke style of a shape command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Packed `0xRRGGBB` color.
    pub color: u32,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
    /// Line width in local units.
    pub width: f64,
    /// Whether the stroke is painted at all.
    pub visible: bool,
}

impl StrokeStyle {
    /// No stroke.
    pub const NONE: Self = Self {
        color: 0,
        alpha: 1.0,
        width: 0.0,
        visible: false,
    };

    /// A visible stroke of the given width.
    pub const fn new(width: f64, color: u32, alpha: f32) -> Self {
        Self {
            color,
            alpha,
            width,
            visible: true,
        }
    }

    /// Returns `true` if this stroke produces a draw call.
    ///
    /// A visible stroke of zero width draws nothing.
    pub fn is_drawn(&self) -> bool {
        self.visible && self.width > 0.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Geometry of a single shape command, in the owning node's local space.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Circle centered at `(x, y)`.
    Circle {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Radius.
        radius: f64,
    },
    /// Axis-aligned ellipse centered at `(x, y)`.
    Ellipse {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Horizontal radius.
        half_width: f64,
        /// Vertical radius.
        half_height: f64,
    },
    /// Polyline through `points`, closed back to the first point if `closed`.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Whether the outline returns to the first vertex.
        closed: bool,
    },
    /// Axis-aligned rectangle with its top-left corner at `(x, y)`.
    Rectangle {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Rectangle with equal circular corner radii.
    RoundedRectangle {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Corner radius.
        radius: f64,
    },
}

/// One styled geometry inside a shape batch.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeCommand {
    /// What to draw.
    pub geometry: Geometry,
    /// Interior paint.
    pub fill: FillStyle,
    /// Outline paint.
    pub stroke: StrokeStyle,
}

impl ShapeCommand {
    /// A command with neither fill nor stroke.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            fill: FillStyle::NONE,
            stroke: StrokeStyle::NONE,
        }
    }

    /// Returns the command with the given fill.
    #[must_use]
    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = fill;
        self
    }

    /// Returns the command with the given stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }
}
