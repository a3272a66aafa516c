//! Sidedness and incidence predicates on `Coord`.
//!
//! Orientation is evaluated in double-double so that nearly collinear triples
//! do not flip sign; incidence tests are tolerance based.

use super::pair_float::PairFloat;
use crate::geom::Coord;

/// Sign of the turn `p -> q -> r`: 1 counterclockwise, -1 clockwise, 0 collinear.
pub fn orientation(p: Coord, q: Coord, r: Coord) -> i32 {
    let dx1 = PairFloat::from_f64(q.x).sub_f64(p.x);
    let dy1 = PairFloat::from_f64(q.y).sub_f64(p.y);
    let dx2 = PairFloat::from_f64(r.x).sub_f64(p.x);
    let dy2 = PairFloat::from_f64(r.y).sub_f64(p.y);
    (dx1 * dy2 - dy1 * dx2).signum()
}

/// Componentwise equality within `tol`.
#[inline]
pub fn coord_eq(a: Coord, b: Coord, tol: f64) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}

/// Distance from `p` to the infinite line through `a`, `b` (0 for a degenerate segment at `p`).
pub fn line_distance(p: Coord, a: Coord, b: Coord) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len == 0.0 {
        return (p - a).norm();
    }
    PairFloat::determinant(d.x, d.y, p.x - a.x, p.y - a.y)
        .value()
        .abs()
        / len
}

/// Whether `p` lies on the closed segment `[a, b]` within `tol`.
pub fn point_on_segment(p: Coord, a: Coord, b: Coord, tol: f64) -> bool {
    if coord_eq(p, a, tol) || coord_eq(p, b, tol) {
        return true;
    }
    if p.x < a.x.min(b.x) - tol
        || p.x > a.x.max(b.x) + tol
        || p.y < a.y.min(b.y) - tol
        || p.y > a.y.max(b.y) + tol
    {
        return false;
    }
    if (b - a).norm_squared() == 0.0 {
        return false;
    }
    orientation(a, b, p) == 0 || line_distance(p, a, b) <= tol
}

/// Projection parameter of `p` onto `a + t (b - a)`; 0 for a degenerate segment.
#[inline]
pub fn segment_param(p: Coord, a: Coord, b: Coord) -> f64 {
    let d = b - a;
    let len2 = d.norm_squared();
    if len2 == 0.0 {
        0.0
    } else {
        (p - a).dot(&d) / len2
    }
}
