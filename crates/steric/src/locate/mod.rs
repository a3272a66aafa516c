//! Point-in-geometry classification.
//!
//! Purpose
//! - `point_in_ring`: horizontal-ray parity test with the x-intercept of
//!   each crossing edge evaluated in double-double.
//! - `locate`: DE-9IM location (interior, boundary, exterior) of a point
//!   with respect to any atomic `Steric`.
//! - `classify`: fold of per-vertex locations into an [`InPolygon`] outcome
//!   for a point, line or polygon against a polygon.

mod in_polygon;

pub use in_polygon::{classify, InPolygon};

use crate::calc::{coord_eq, point_on_segment, PairFloat};
use crate::geom::{is_closed_chain, Coord, Steric};

/// Location of a point relative to a geometry, ordered as the DE-9IM rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    Interior = 0,
    Boundary = 1,
    Exterior = 2,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// `(inside, on_boundary)` of `p` against a closed ring.
///
/// An open ring yields `(false, false)`; a point on an edge yields
/// `(false, true)`.
pub fn point_in_ring(p: Coord, ring: &[Coord], tol: f64) -> (bool, bool) {
    if !is_closed_chain(ring, tol) {
        return (false, false);
    }
    if ring
        .windows(2)
        .any(|w| point_on_segment(p, w[0], w[1], tol))
    {
        return (false, true);
    }
    let mut inside = false;
    for w in ring.windows(2) {
        let (a, b) = (w[0], w[1]);
        if (a.y > p.y) == (b.y > p.y) {
            continue;
        }
        // x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y)
        let x = PairFloat::from_f64(p.y)
            .sub_f64(a.y)
            .mul_pair(PairFloat::from_f64(b.x).sub_f64(a.x))
            .div_pair(PairFloat::from_f64(b.y).sub_f64(a.y))
            .add_f64(a.x);
        if x > PairFloat::from_f64(p.x) {
            inside = !inside;
        }
    }
    (inside, false)
}

/// Location of `p` in a polygon given as shell followed by holes.
pub fn locate_in_polygon(p: Coord, rings: &[Vec<Coord>], tol: f64) -> Location {
    let Some((shell, holes)) = rings.split_first() else {
        return Location::Exterior;
    };
    match point_in_ring(p, shell, tol) {
        (_, true) => return Location::Boundary,
        (false, false) => return Location::Exterior,
        (true, false) => {}
    }
    for hole in holes {
        match point_in_ring(p, hole, tol) {
            (_, true) => return Location::Boundary,
            (true, false) => return Location::Exterior,
            (false, false) => {}
        }
    }
    Location::Interior
}

/// Location of `p` on a line string; endpoints of an open line are its boundary.
pub fn locate_in_line(p: Coord, pts: &[Coord], tol: f64) -> Location {
    if pts.is_empty() {
        return Location::Exterior;
    }
    if !is_closed_chain(pts, tol)
        && (coord_eq(p, pts[0], tol) || coord_eq(p, pts[pts.len() - 1], tol))
    {
        return Location::Boundary;
    }
    let on = if pts.len() == 1 {
        coord_eq(p, pts[0], tol)
    } else {
        pts.windows(2).any(|w| point_on_segment(p, w[0], w[1], tol))
    };
    if on {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Location of `p` relative to `g`.
///
/// For collections the strongest member location wins (interior over
/// boundary over exterior).
pub fn locate(p: Coord, g: &Steric, tol: f64) -> Location {
    match g {
        Steric::Point(q) => {
            if coord_eq(p, *q, tol) {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        Steric::Line(pts) => locate_in_line(p, pts, tol),
        Steric::Polygon(rings) => locate_in_polygon(p, rings, tol),
        Steric::Collection(items) => items
            .iter()
            .map(|s| locate(p, s, tol))
            .min()
            .unwrap_or(Location::Exterior),
    }
}
