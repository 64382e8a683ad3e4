// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content stream operator helpers.

use canopy_surface::kurbo::PathEl;
use canopy_surface::{Affine, BezPath, Point, Rect};
use lopdf::Object;
use lopdf::content::Operation;

pub(crate) fn op(operator: &str, operands: &[f64]) -> Operation {
    Operation::new(operator, operands.iter().map(|v| Object::from(*v)).collect())
}

pub(crate) fn bare(operator: &str) -> Operation {
    Operation::new(operator, Vec::new())
}

pub(crate) fn named(operator: &str, name: &str) -> Operation {
    Operation::new(operator, vec![Object::Name(name.as_bytes().to_vec())])
}

pub(crate) fn concat(transform: Affine) -> Operation {
    op("cm", &transform.as_coeffs())
}

pub(crate) fn rect(r: Rect) -> Operation {
    op("re", &[r.x0, r.y0, r.width(), r.height()])
}

/// Appends path construction operators for `path`. Quadratic segments are
/// raised to cubics.
pub(crate) fn path(path: &BezPath, ops: &mut Vec<Operation>) {
    let mut start = Point::ORIGIN;
    let mut last = Point::ORIGIN;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                ops.push(op("m", &[p.x, p.y]));
                start = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                ops.push(op("l", &[p.x, p.y]));
                last = p;
            }
            PathEl::QuadTo(q, p) => {
                let c1 = last + (q - last) * (2.0 / 3.0);
                let c2 = p + (q - p) * (2.0 / 3.0);
                ops.push(op("c", &[c1.x, c1.y, c2.x, c2.y, p.x, p.y]));
                last = p;
            }
            PathEl::CurveTo(c1, c2, p) => {
                ops.push(op("c", &[c1.x, c1.y, c2.x, c2.y, p.x, p.y]));
                last = p;
            }
            PathEl::ClosePath => {
                ops.push(bare("h"));
                last = start;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|o| o.operator.as_str()).collect()
    }

    #[test]
    fn quads_become_cubics() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.quad_to((3.0, 3.0), (6.0, 0.0));
        p.close_path();
        let mut ops = Vec::new();
        path(&p, &mut ops);
        assert_eq!(operators(&ops), ["m", "c", "h"]);
        let c: Vec<f32> = ops[1]
            .operands
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();
        assert_eq!(c, vec![2.0, 2.0, 4.0, 2.0, 6.0, 0.0]);
    }

    #[test]
    fn rect_uses_origin_and_size() {
        let o = rect(Rect::new(10.0, 20.0, 40.0, 25.0));
        assert_eq!(o.operator, "re");
        let v: Vec<f32> = o.operands.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(v, vec![10.0, 20.0, 30.0, 5.0]);
    }
}
