// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, BezPath, Point, Rect};

/// Flattening tolerance used when backends convert curves to paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Builds a polyline path through `points`.
///
/// Returns an empty path for an empty slice.
pub fn polygon_path(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return path;
    };
    path.move_to(*first);
    for p in iter {
        path.line_to(*p);
    }
    if closed {
        path.close_path();
    }
    path
}

/// Maps image pixel space so that `src` lands exactly on `dst`.
pub fn image_rect_transform(src: Rect, dst: Rect) -> Affine {
    let sx = if src.width() != 0.0 {
        dst.width() / src.width()
    } else {
        1.0
    };
    let sy = if src.height() != 0.0 {
        dst.height() / src.height()
    } else {
        1.0
    };
    Affine::translate((dst.x0, dst.y0))
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate((-src.x0, -src.y0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn closed_polygon_ends_with_close() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 5.0),
        ];
        let path = polygon_path(&pts, true);
        let els: alloc::vec::Vec<_> = path.elements().to_vec();
        assert_eq!(els.len(), 4, "move, two lines, close");
        assert_eq!(els[3], PathEl::ClosePath, "close");
        assert!(polygon_path(&[], true).elements().is_empty(), "empty");
    }

    #[test]
    fn image_transform_maps_corners() {
        let src = Rect::new(10.0, 20.0, 30.0, 60.0);
        let dst = Rect::new(-5.0, -5.0, 35.0, 75.0);
        let xf = image_rect_transform(src, dst);
        let a = xf * Point::new(10.0, 20.0);
        let b = xf * Point::new(30.0, 60.0);
        assert!((a - Point::new(-5.0, -5.0)).hypot() < 1e-9, "top-left");
        assert!((b - Point::new(35.0, 75.0)).hypot() < 1e-9, "bottom-right");
    }
}
