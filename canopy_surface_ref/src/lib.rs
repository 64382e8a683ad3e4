// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_surface_ref --heading-base-level=0

//! Canopy Surface Reference: a recording [`Surface`].
//!
//! This crate provides a small, stateful implementation of [`Surface`] for
//! **call recording and state tracing**:
//! - It does **not** rasterize to pixels.
//! - It does **not** define what correct output looks like for other backends.
//! - It is intended for tests and debugging that want to assert on emitted
//!   calls and the surface state at the time each call was applied.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use canopy_surface::{Affine, Color, ImageView, Paint, Point, Rect, Surface, SurfaceError};

/// Snapshot of the recording surface's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Number of outstanding saves.
    pub save_depth: usize,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            save_depth: 0,
        }
    }
}

/// A surface call as received.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// [`Surface::save`].
    Save,
    /// [`Surface::restore`].
    Restore,
    /// [`Surface::concat`].
    Concat(Affine),
    /// [`Surface::translate`].
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// [`Surface::rotate`].
    Rotate {
        /// Angle in radians.
        radians: f64,
    },
    /// [`Surface::scale`].
    Scale {
        /// Horizontal factor.
        sx: f64,
        /// Vertical factor.
        sy: f64,
    },
    /// [`Surface::clear`].
    Clear(Color),
    /// [`Surface::draw_circle`].
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Paint.
        paint: Paint,
    },
    /// [`Surface::draw_oval`].
    Oval {
        /// Bounding box.
        bounds: Rect,
        /// Paint.
        paint: Paint,
    },
    /// [`Surface::draw_polygon`].
    Polygon {
        /// Vertices.
        points: Vec<Point>,
        /// Whether the outline was closed.
        closed: bool,
        /// Paint.
        paint: Paint,
    },
    /// [`Surface::draw_rect`].
    Rect {
        /// Rectangle.
        rect: Rect,
        /// Paint.
        paint: Paint,
    },
    /// [`Surface::draw_round_rect`].
    RoundRect {
        /// Rectangle.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Paint.
        paint: Paint,
    },
    /// [`Surface::draw_image_rect`] that reached the surface.
    ImageRect {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Source rectangle in image pixels.
        src: Rect,
        /// Destination rectangle in local coordinates.
        dst: Rect,
    },
}

impl SurfaceOp {
    /// Returns `true` for calls that produce pixels.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::Clear(_)
                | Self::Circle { .. }
                | Self::Oval { .. }
                | Self::Polygon { .. }
                | Self::Rect { .. }
                | Self::RoundRect { .. }
                | Self::ImageRect { .. }
        )
    }

    /// Paint of a shape draw.
    pub fn paint(&self) -> Option<&Paint> {
        match self {
            Self::Circle { paint, .. }
            | Self::Oval { paint, .. }
            | Self::Polygon { paint, .. }
            | Self::Rect { paint, .. }
            | Self::RoundRect { paint, .. } => Some(paint),
            _ => None,
        }
    }
}

/// A recorded call and the state it was applied with.
///
/// For state calls the snapshot is taken after applying the call; for draws it
/// is the state used for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The call.
    pub op: SurfaceOp,
    /// Surface state.
    pub state: StateSnapshot,
}

/// Surface that records every call with a state snapshot.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    events: Vec<Event>,
    state: StateSnapshot,
    stack: Vec<Affine>,
    unbalanced_restores: usize,
    reject_images: bool,
}

impl RecordingSurface {
    /// An empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded draw events, in order.
    pub fn draws(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(|e| e.op.is_draw())
    }

    /// Clears recorded events but keeps the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Current state.
    pub fn state(&self) -> StateSnapshot {
        self.state
    }

    /// Number of restores received with no outstanding save.
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    /// Makes every subsequent image draw fail with [`SurfaceError::ImageCreation`].
    pub fn reject_images(&mut self, reject: bool) {
        self.reject_images = reject;
    }

    fn record(&mut self, op: SurfaceOp) {
        self.events.push(Event {
            op,
            state: self.state,
        });
    }

    fn apply(&mut self, transform: Affine, op: SurfaceOp) {
        self.state.transform *= transform;
        self.record(op);
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state.transform);
        self.state.save_depth = self.stack.len();
        self.record(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(transform) => self.state.transform = transform,
            None => self.unbalanced_restores += 1,
        }
        self.state.save_depth = self.stack.len();
        self.record(SurfaceOp::Restore);
    }

    fn save_count(&self) -> usize {
        self.stack.len()
    }

    fn concat(&mut self, transform: Affine) {
        self.apply(transform, SurfaceOp::Concat(transform));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.apply(
            Affine::translate((dx, dy)),
            SurfaceOp::Translate { dx, dy },
        );
    }

    fn rotate(&mut self, radians: f64) {
        self.apply(Affine::rotate(radians), SurfaceOp::Rotate { radians });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.apply(
            Affine::scale_non_uniform(sx, sy),
            SurfaceOp::Scale { sx, sy },
        );
    }

    fn clear(&mut self, color: Color) {
        self.record(SurfaceOp::Clear(color));
    }

    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.record(SurfaceOp::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_oval(&mut self, bounds: Rect, paint: &Paint) {
        self.record(SurfaceOp::Oval {
            bounds,
            paint: *paint,
        });
    }

    fn draw_polygon(&mut self, points: &[Point], closed: bool, paint: &Paint) {
        self.record(SurfaceOp::Polygon {
            points: points.to_vec(),
            closed,
            paint: *paint,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.record(SurfaceOp::Rect {
            rect,
            paint: *paint,
        });
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        self.record(SurfaceOp::RoundRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn draw_image_rect(
        &mut self,
        image: ImageView<'_>,
        src: Rect,
        dst: Rect,
    ) -> Result<(), SurfaceError> {
        if self.reject_images {
            return Err(SurfaceError::ImageCreation("images rejected"));
        }
        image.check_source(src)?;
        self.record(SurfaceOp::ImageRect {
            width: image.width(),
            height: image.height(),
            src,
            dst,
        });
        Ok(())
    }
}
