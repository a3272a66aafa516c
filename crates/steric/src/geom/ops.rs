//! Measures, validation and tolerant equality on `Steric` values.

use super::types::{Coord, Steric};
use crate::calc::coord_eq;
use crate::error::{Error, Result};

/// Shoelace signed area; positive for counterclockwise rings.
pub fn signed_area(ring: &[Coord]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for w in ring.windows(2) {
        acc += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    let (first, last) = (ring[0], ring[ring.len() - 1]);
    if first != last {
        acc += last.x * first.y - first.x * last.y;
    }
    0.5 * acc
}

/// First and last point coincide (three points or more).
#[inline]
pub fn is_closed_chain(pts: &[Coord], tol: f64) -> bool {
    pts.len() >= 3 && coord_eq(pts[0], pts[pts.len() - 1], tol)
}

/// Ring equality up to rotation and direction.
pub fn ring_equal(a: &[Coord], b: &[Coord], tol: f64) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.len() < 2 {
        return a.iter().zip(b).all(|(p, q)| coord_eq(*p, *q, tol));
    }
    let a = &a[..a.len() - 1];
    let b = &b[..b.len() - 1];
    let n = a.len();
    (0..n).filter(|&k| coord_eq(a[0], b[k], tol)).any(|k| {
        let fwd = (0..n).all(|i| coord_eq(a[i], b[(k + i) % n], tol));
        fwd || (0..n).all(|i| coord_eq(a[i], b[(k + n - i) % n], tol))
    })
}

fn line_equal(a: &[Coord], b: &[Coord], tol: f64) -> bool {
    if is_closed_chain(a, tol) && is_closed_chain(b, tol) {
        return ring_equal(a, b, tol);
    }
    a.len() == b.len()
        && (a.iter().zip(b).all(|(p, q)| coord_eq(*p, *q, tol))
            || a.iter().zip(b.iter().rev()).all(|(p, q)| coord_eq(*p, *q, tol)))
}

/// Match every element of `a` with a distinct element of `b`.
fn matched_all<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut taken = vec![false; b.len()];
    a.iter().all(|x| {
        match (0..b.len()).find(|&j| !taken[j] && eq(x, &b[j])) {
            Some(j) => {
                taken[j] = true;
                true
            }
            None => false,
        }
    })
}

impl Steric {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<()> {
        let finite = |pts: &[Coord]| pts.iter().all(|p| p.x.is_finite() && p.y.is_finite());
        match self {
            Steric::Point(p) => {
                if !finite(std::slice::from_ref(p)) {
                    return Err(Error::invalid("point has a non-finite coordinate"));
                }
            }
            Steric::Line(pts) => {
                if pts.len() < 2 {
                    return Err(Error::invalid(format!(
                        "line needs at least 2 points, got {}",
                        pts.len()
                    )));
                }
                if !finite(pts) {
                    return Err(Error::invalid("line has a non-finite coordinate"));
                }
            }
            Steric::Polygon(rings) => {
                if rings.is_empty() {
                    return Err(Error::invalid("polygon has no shell"));
                }
                for (k, ring) in rings.iter().enumerate() {
                    if ring.len() < 4 {
                        return Err(Error::invalid(format!(
                            "ring {k} needs at least 4 points, got {}",
                            ring.len()
                        )));
                    }
                    if ring[0] != ring[ring.len() - 1] {
                        return Err(Error::invalid(format!("ring {k} is not closed")));
                    }
                    if !finite(ring) {
                        return Err(Error::invalid(format!("ring {k} has a non-finite coordinate")));
                    }
                }
            }
            Steric::Collection(items) => {
                for item in items {
                    item.validate()?;
                }
            }
        }
        Ok(())
    }

    /// Closed line (first point equals last). False for other shapes.
    pub fn is_closed(&self, tol: f64) -> bool {
        match self {
            Steric::Line(pts) => is_closed_chain(pts, tol),
            _ => false,
        }
    }

    /// Absolute area with holes subtracted.
    pub fn area(&self) -> f64 {
        match self {
            Steric::Polygon(rings) => {
                let mut it = rings.iter();
                let shell = it.next().map(|r| signed_area(r).abs()).unwrap_or(0.0);
                shell - it.map(|r| signed_area(r).abs()).sum::<f64>()
            }
            Steric::Collection(items) => items.iter().map(Steric::area).sum(),
            _ => 0.0,
        }
    }

    /// Total length of lines and polygon rings.
    pub fn length(&self) -> f64 {
        let chain = |pts: &[Coord]| pts.windows(2).map(|w| (w[1] - w[0]).norm()).sum::<f64>();
        match self {
            Steric::Point(_) => 0.0,
            Steric::Line(pts) => chain(pts),
            Steric::Polygon(rings) => rings.iter().map(|r| chain(r)).sum(),
            Steric::Collection(items) => items.iter().map(Steric::length).sum(),
        }
    }

    /// Axis-aligned `(min, max)` corners; `None` for the empty geometry.
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        let mut pts = self.coords().into_iter();
        let first = pts.next()?;
        Some(pts.fold((first, first), |(lo, hi), p| {
            (
                Coord::new(lo.x.min(p.x), lo.y.min(p.y)),
                Coord::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// All vertices in storage order.
    pub fn coords(&self) -> Vec<Coord> {
        match self {
            Steric::Point(p) => vec![*p],
            Steric::Line(pts) => pts.clone(),
            Steric::Polygon(rings) => rings.iter().flatten().copied().collect(),
            Steric::Collection(items) => items.iter().flat_map(Steric::coords).collect(),
        }
    }

    /// Mod-2 boundary points: endpoints of open lines.
    pub fn boundary_points(&self, tol: f64) -> Vec<Coord> {
        match self {
            Steric::Line(pts) if !is_closed_chain(pts, tol) => {
                vec![pts[0], pts[pts.len() - 1]]
            }
            _ => Vec::new(),
        }
    }

    /// Coordinate-wise equality within `tol`, insensitive to ring rotation,
    /// line direction, hole order and collection order.
    pub fn proximity(&self, other: &Steric, tol: f64) -> bool {
        match (self, other) {
            (Steric::Point(p), Steric::Point(q)) => coord_eq(*p, *q, tol),
            (Steric::Line(a), Steric::Line(b)) => line_equal(a, b, tol),
            (Steric::Polygon(a), Steric::Polygon(b)) => {
                a.len() == b.len()
                    && !a.is_empty()
                    && ring_equal(&a[0], &b[0], tol)
                    && matched_all(&a[1..], &b[1..], |x, y| ring_equal(x, y, tol))
            }
            (Steric::Collection(a), Steric::Collection(b)) => {
                matched_all(a, b, |x, y| x.proximity(y, tol))
            }
            _ => false,
        }
    }
}
