// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_scene --heading-base-level=0

//! Canopy Scene: the display tree that Canopy translates onto drawing surfaces.
//!
//! A scene is an owned tree of [`DisplayNode`]s. Every node has a local
//! [`Transform`] and a [`NodeKind`] payload:
//!
//! - [`NodeKind::Group`]: child nodes, painted in order (back to front).
//! - [`NodeKind::Shapes`]: an ordered batch of [`ShapeCommand`]s, each a
//!   [`Geometry`] with an optional fill and an optional stroke.
//! - [`NodeKind::Image`]: an [`ImageSprite`] that shows a frame of a shared
//!   [`Texture`].
//!
//! The tree is plain data. Renderers borrow it immutably and may walk it any
//! number of times.
//!
//! ## Example
//!
//! ```
//! use canopy_scene::{DisplayNode, ShapeBatchBuilder, Transform};
//!
//! let mut batch = ShapeBatchBuilder::new();
//! batch.begin_fill(0xff0000, 1.0).draw_rect(-50.0, -75.0, 100.0, 150.0).end_fill();
//!
//! let scene = DisplayNode::group(vec![
//!     batch.into_node().with_transform(Transform::IDENTITY.with_position(120.0, 60.0)),
//! ]);
//! assert_eq!(scene.children().len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod color;
mod node;
mod shape;
mod sprite;
mod store;
mod transform;

pub use builder::ShapeBatchBuilder;
pub use color::Rgb;
pub use node::{DisplayNode, NodeKind};
pub use shape::{FillStyle, Geometry, ShapeCommand, StrokeStyle};
pub use sprite::{ImageSprite, Texture};
pub use store::{SceneId, SceneStore};
pub use transform::Transform;

pub use kurbo::{Point, Rect, Vec2};
