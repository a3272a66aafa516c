//! Vertex-fold classification of an entity against a polygon.

use super::{locate_in_polygon, Location};
use crate::geom::{Coord, Steric};

/// Aggregate position of an entity's vertices relative to a polygon.
///
/// The fold [`InPolygon::combine`] is the union of four facts (some vertex
/// strictly inside, strictly outside, on the boundary, some part enclosing
/// the polygon), so it is commutative, associative and has `Default` as
/// identity. `Include` absorbs every other outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InPolygon {
    /// Inside and on the boundary.
    PartIn = 4,
    OnlyIn = 3,
    /// Only on the boundary.
    OnlyInLine = 2,
    /// Inside and outside.
    Both = 1,
    /// Nothing folded yet.
    Default = 0,
    OnlyOut = -1,
    /// Outside and on the boundary.
    PartOut = -2,
    /// The entity's shell strictly encloses the polygon's shell.
    Include = -3,
}

const IN: u8 = 1;
const OUT: u8 = 2;
const LINE: u8 = 4;
const INCLUDE: u8 = 8;

impl InPolygon {
    pub fn from_location(loc: Location) -> Self {
        match loc {
            Location::Interior => InPolygon::OnlyIn,
            Location::Boundary => InPolygon::OnlyInLine,
            Location::Exterior => InPolygon::OnlyOut,
        }
    }

    fn flags(self) -> u8 {
        match self {
            InPolygon::PartIn => IN | LINE,
            InPolygon::OnlyIn => IN,
            InPolygon::OnlyInLine => LINE,
            InPolygon::Both => IN | OUT,
            InPolygon::Include => INCLUDE | OUT,
            InPolygon::Default => 0,
            InPolygon::OnlyOut => OUT,
            InPolygon::PartOut => OUT | LINE,
        }
    }

    fn from_flags(f: u8) -> Self {
        if f & INCLUDE != 0 {
            InPolygon::Include
        } else if f & IN != 0 && f & OUT != 0 {
            InPolygon::Both
        } else if f & IN != 0 {
            if f & LINE != 0 {
                InPolygon::PartIn
            } else {
                InPolygon::OnlyIn
            }
        } else if f & OUT != 0 {
            if f & LINE != 0 {
                InPolygon::PartOut
            } else {
                InPolygon::OnlyOut
            }
        } else if f & LINE != 0 {
            InPolygon::OnlyInLine
        } else {
            InPolygon::Default
        }
    }

    /// Combination table:
    ///
    /// | self \ next | In     | Line   | Out    |
    /// |-------------|--------|--------|--------|
    /// | In          | In     | PartIn | Both   |
    /// | Line        | PartIn | Line   | PartOut|
    /// | Out         | Both   | PartOut| Out    |
    ///
    /// `PartIn`/`PartOut` absorb their own side and `Line`; meeting the
    /// opposite side gives `Both`. `Both` absorbs everything.
    pub fn combine(self, next: InPolygon) -> InPolygon {
        match (self, next) {
            (InPolygon::Default, x) | (x, InPolygon::Default) => x,
            (a, b) => InPolygon::from_flags(a.flags() | b.flags()),
        }
    }

    /// Some vertex lies strictly inside.
    pub fn touches_interior(self) -> bool {
        self.flags() & IN != 0
    }

    /// Some vertex lies strictly outside.
    pub fn touches_exterior(self) -> bool {
        self.flags() & OUT != 0
    }
}

fn fold(points: impl IntoIterator<Item = Coord>, rings: &[Vec<Coord>], tol: f64) -> InPolygon {
    points.into_iter().fold(InPolygon::Default, |acc, p| {
        acc.combine(InPolygon::from_location(locate_in_polygon(p, rings, tol)))
    })
}

/// Vertices plus segment midpoints; midpoints catch chords between boundary vertices.
fn samples(pts: &[Coord]) -> impl Iterator<Item = Coord> + '_ {
    pts.iter()
        .copied()
        .chain(pts.windows(2).map(|w| (w[0] + w[1]) * 0.5))
}

/// Classify `entity` against the polygon `rings`.
///
/// Returns `(point_class, entity_class)`: the fold over boundary points
/// (line endpoints, or the point itself) and the fold over all vertices.
pub fn classify(entity: &Steric, rings: &[Vec<Coord>], tol: f64) -> (InPolygon, InPolygon) {
    match entity {
        Steric::Point(p) => {
            let c = InPolygon::from_location(locate_in_polygon(*p, rings, tol));
            (c, c)
        }
        Steric::Line(pts) => (
            fold(entity.boundary_points(tol), rings, tol),
            fold(samples(pts), rings, tol),
        ),
        Steric::Polygon(own) => {
            let Some(shell) = own.first() else {
                return (InPolygon::Default, InPolygon::Default);
            };
            let mut e = fold(samples(shell), rings, tol);
            if e == InPolygon::OnlyOut {
                if let Some(other_shell) = rings.first() {
                    if fold(samples(other_shell), std::slice::from_ref(shell), tol)
                        == InPolygon::OnlyIn
                    {
                        e = InPolygon::Include;
                    }
                }
            }
            (InPolygon::Default, e)
        }
        Steric::Collection(items) => items.iter().fold(
            (InPolygon::Default, InPolygon::Default),
            |(pc, ec), item| {
                let (p, e) = classify(item, rings, tol);
                (pc.combine(p), ec.combine(e))
            },
        ),
    }
}
