// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use kurbo::Point;

use crate::{DisplayNode, FillStyle, Geometry, ShapeCommand, StrokeStyle};

/// Pen-style authoring of a shape batch.
///
/// Styles are sticky: every shape drawn after [`begin_fill`](Self::begin_fill)
/// or [`line_style`](Self::line_style) picks up the current fill and stroke.
/// `move_to`/`line_to` build an open polyline that is committed by
/// [`finish_poly`](Self::finish_poly), [`close_path`](Self::close_path), the
/// next `move_to`, or the next shape.
#[derive(Clone, Debug, Default)]
pub struct ShapeBatchBuilder {
    fill: FillStyle,
    stroke: StrokeStyle,
    pen: Vec<Point>,
    commands: Vec<ShapeCommand>,
}

impl ShapeBatchBuilder {
    /// An empty builder with no fill and no stroke.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill used by subsequent shapes.
    pub fn begin_fill(&mut self, color: u32, alpha: f32) -> &mut Self {
        self.finish_poly();
        self.fill = FillStyle::solid(color, alpha);
        self
    }

    /// Stops filling subsequent shapes.
    pub fn end_fill(&mut self) -> &mut Self {
        self.finish_poly();
        self.fill = FillStyle::NONE;
        self
    }

    /// Sets the stroke used by subsequent shapes. A width of zero disables it.
    pub fn line_style(&mut self, width: f64, color: u32, alpha: f32) -> &mut Self {
        self.finish_poly();
        self.stroke = StrokeStyle::new(width, color, alpha);
        self
    }

    /// Adds a circle.
    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64) -> &mut Self {
        self.push(Geometry::Circle { x, y, radius })
    }

    /// Adds an ellipse; `half_width` and `half_height` are the radii.
    pub fn draw_ellipse(&mut self, x: f64, y: f64, half_width: f64, half_height: f64) -> &mut Self {
        self.push(Geometry::Ellipse {
            x,
            y,
            half_width,
            half_height,
        })
    }

    /// Adds a rectangle.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push(Geometry::Rectangle {
            x,
            y,
            width,
            height,
        })
    }

    /// Adds a rectangle with rounded corners.
    pub fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> &mut Self {
        self.push(Geometry::RoundedRectangle {
            x,
            y,
            width,
            height,
            radius,
        })
    }

    /// Adds a closed polygon.
    pub fn draw_polygon(&mut self, points: impl IntoIterator<Item = Point>) -> &mut Self {
        self.push(Geometry::Polygon {
            points: points.into_iter().collect(),
            closed: true,
        })
    }

    /// Starts a new polyline at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.finish_poly();
        self.pen.push(Point::new(x, y));
        self
    }

    /// Extends the current polyline, starting one at the origin if needed.
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        if self.pen.is_empty() {
            self.pen.push(Point::ORIGIN);
        }
        self.pen.push(Point::new(x, y));
        self
    }

    /// Commits the current polyline as an open polygon.
    ///
    /// A polyline with fewer than two points is dropped.
    pub fn finish_poly(&mut self) -> &mut Self {
        self.commit_pen(false);
        self
    }

    /// Commits the current polyline as a closed polygon.
    pub fn close_path(&mut self) -> &mut Self {
        self.commit_pen(true);
        self
    }

    /// Returns the commands authored so far.
    pub fn into_commands(mut self) -> Vec<ShapeCommand> {
        self.finish_poly();
        self.commands
    }

    /// Wraps the authored commands in a shape batch node.
    pub fn into_node(self) -> DisplayNode {
        DisplayNode::shapes(self.into_commands())
    }

    fn push(&mut self, geometry: Geometry) -> &mut Self {
        self.finish_poly();
        self.commands.push(ShapeCommand {
            geometry,
            fill: self.fill,
            stroke: self.stroke,
        });
        self
    }

    fn commit_pen(&mut self, closed: bool) {
        let points = core::mem::take(&mut self.pen);
        if points.len() < 2 {
            return;
        }
        self.commands.push(ShapeCommand {
            geometry: Geometry::Polygon { points, closed },
            fill: self.fill,
            stroke: self.stroke,
        });
    }
}
