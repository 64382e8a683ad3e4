// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Cap, Join, Stroke};
use peniko::Color;

/// Whether a shape is filled or outlined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintStyle {
    /// Fill the interior (non-zero winding).
    Fill,
    /// Outline with the given line width.
    Stroke {
        /// Line width in local units.
        width: f64,
    },
}

/// Paint for a single draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Color, including alpha.
    pub color: Color,
}

impl Paint {
    /// A fill paint.
    pub const fn fill(color: Color) -> Self {
        Self {
            style: PaintStyle::Fill,
            color,
        }
    }

    /// A stroke paint of the given width.
    pub const fn stroke(color: Color, width: f64) -> Self {
        Self {
            style: PaintStyle::Stroke { width },
            color,
        }
    }

    /// The `kurbo` stroke for stroke paints, with round joins and butt caps.
    pub fn kurbo_stroke(&self) -> Option<Stroke> {
        match self.style {
            PaintStyle::Fill => None,
            PaintStyle::Stroke { width } => Some(
                Stroke::new(width)
                    .with_join(Join::Round)
                    .with_caps(Cap::Butt),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_paint_uses_round_joins() {
        let stroke = Paint::stroke(Color::BLACK, 3.0)
            .kurbo_stroke()
            .expect("stroke paint has a stroke");
        assert_eq!(stroke.width, 3.0, "width");
        assert_eq!(stroke.join, Join::Round, "join");
        assert_eq!(stroke.start_cap, Cap::Butt, "cap");
        assert!(Paint::fill(Color::WHITE).kurbo_stroke().is_none(), "fill");
    }
}
