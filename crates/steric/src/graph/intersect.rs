//! Segment/segment intersection with endpoint snapping.

use crate::calc::{coord_eq, line_distance, orientation, point_on_segment, segment_param};
use crate::geom::Coord;

/// Outcome of intersecting two closed segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    None,
    Point(Coord),
    /// Collinear overlap between the two given points.
    Overlap(Coord, Coord),
}

/// Replace `p` by the first segment endpoint within `tol`.
fn snap(p: Coord, ends: [Coord; 4], tol: f64) -> Coord {
    ends.into_iter().find(|e| coord_eq(p, *e, tol)).unwrap_or(p)
}

fn collinear(a0: Coord, a1: Coord, b0: Coord, b1: Coord, tol: f64) -> bool {
    let on_a = |p: Coord| orientation(a0, a1, p) == 0 || line_distance(p, a0, a1) <= tol;
    let on_b = |p: Coord| orientation(b0, b1, p) == 0 || line_distance(p, b0, b1) <= tol;
    (on_a(b0) && on_a(b1)) || (on_b(a0) && on_b(a1))
}

/// Intersect `[a0, a1]` with `[b0, b1]`.
///
/// Endpoint coincidence and endpoint-on-segment touches are resolved first
/// with tolerance; proper crossings use double-double orientation signs.
pub fn intersect_segments(a0: Coord, a1: Coord, b0: Coord, b1: Coord, tol: f64) -> SegmentIntersection {
    let ends = [a0, a1, b0, b1];
    let a_degenerate = coord_eq(a0, a1, tol);
    let b_degenerate = coord_eq(b0, b1, tol);
    if a_degenerate || b_degenerate {
        let (p, s0, s1) = if a_degenerate { (a0, b0, b1) } else { (b0, a0, a1) };
        return if point_on_segment(p, s0, s1, tol) {
            SegmentIntersection::Point(p)
        } else {
            SegmentIntersection::None
        };
    }

    if collinear(a0, a1, b0, b1, tol) {
        // Project onto the longer segment.
        let (p0, p1, q0, q1) = if (a1 - a0).norm_squared() >= (b1 - b0).norm_squared() {
            (a0, a1, b0, b1)
        } else {
            (b0, b1, a0, a1)
        };
        let t0 = segment_param(q0, p0, p1);
        let t1 = segment_param(q1, p0, p1);
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);
        let d = p1 - p0;
        let slack = tol / d.norm();
        if hi < lo - slack {
            return SegmentIntersection::None;
        }
        let s = snap(p0 + d * lo, ends, tol);
        let e = snap(p0 + d * hi.max(lo), ends, tol);
        return if coord_eq(s, e, tol) {
            SegmentIntersection::Point(s)
        } else {
            SegmentIntersection::Overlap(s, e)
        };
    }

    for (p, s0, s1) in [(b0, a0, a1), (b1, a0, a1), (a0, b0, b1), (a1, b0, b1)] {
        if point_on_segment(p, s0, s1, tol) {
            return SegmentIntersection::Point(p);
        }
    }

    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);
    if o1 * o2 < 0 && o3 * o4 < 0 {
        let da = a1 - a0;
        let db = b1 - b0;
        let e = b0 - a0;
        let kross = da.x * db.y - da.y * db.x;
        let t = (e.x * db.y - e.y * db.x) / kross;
        return SegmentIntersection::Point(snap(a0 + da * t, ends, tol));
    }
    SegmentIntersection::None
}
