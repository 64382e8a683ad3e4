// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::{ImageSprite, ShapeCommand, Transform};

/// Payload of a [`DisplayNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Children painted in order, back to front.
    Group(Vec<DisplayNode>),
    /// Shape commands painted in order.
    Shapes(Vec<ShapeCommand>),
    /// A textured quad.
    Image(ImageSprite),
}

/// A node of the display tree.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNode {
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// What this node draws.
    pub kind: NodeKind,
}

impl DisplayNode {
    /// A group node with an identity transform.
    pub fn group(children: Vec<Self>) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: NodeKind::Group(children),
        }
    }

    /// A shape batch node with an identity transform.
    pub fn shapes(commands: Vec<ShapeCommand>) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: NodeKind::Shapes(commands),
        }
    }

    /// A sprite node with an identity transform.
    pub fn image(sprite: ImageSprite) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind: NodeKind::Image(sprite),
        }
    }

    /// Returns the node with the given transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Children of a group; empty for leaves.
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            NodeKind::Group(children) => children,
            NodeKind::Shapes(_) | NodeKind::Image(_) => &[],
        }
    }

    /// Number of levels in the subtree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Number of nodes in the subtree rooted here, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }
}
