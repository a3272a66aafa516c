//! DE-9IM relate.
//!
//! Purpose
//! - Classify how two atomic geometries meet as a 9-character intersection
//!   matrix, and name the matching catalogue pattern.
//!
//! Model
//! - Operands are evaluated in dimension-ascending order; the result is
//!   transposed back when the caller passed them the other way round.
//! - Coordinate-equal operands and operands with no shared graph nodes
//!   short-circuit to the catalogue's equal/disjoint patterns.
//! - Otherwise the matrix is synthesized from the labelled graph
//!   ([`synthesize`]).
//! - Closed lines have no boundary; their boundary row/column is cleared.

mod catalogue;
mod compute;
mod matrix;

pub use catalogue::{Catalogue, Entry, ShapePair};
pub use compute::{line_degree_code, synthesize, Structure};
pub use matrix::{IntersectionMatrix, RingInput};

use crate::error::{Error, Result};
use crate::geom::{GeomCfg, Steric};
use crate::graph::{build_topology, Topology};
use crate::locate::{classify, locate, InPolygon, Location};

/// How the matrix was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Equal,
    Disjoint,
}

/// Matrix plus the facts that produced it.
#[derive(Clone, Debug)]
pub struct RelateReport {
    /// DE-9IM in the caller's operand order.
    pub matrix: IntersectionMatrix,
    pub pair: ShapePair,
    /// Operands were swapped for evaluation.
    pub swapped: bool,
    /// Catalogue entry matching the dimension-ascending matrix.
    pub entry: Option<Entry>,
    pub shortcut: Option<Shortcut>,
    /// Structural counts; absent when equality short-circuited.
    pub structure: Option<Structure>,
}

fn ring_input(a: &Steric, b: &Steric, tol: f64) -> Option<RingInput> {
    match (a.is_closed(tol), b.is_closed(tol)) {
        (true, true) => Some(RingInput::Both),
        (true, false) => Some(RingInput::First),
        (false, true) => Some(RingInput::Second),
        (false, false) => None,
    }
}

/// Disjointness once the graph has no shared node.
fn no_contact(topo: &Topology) -> bool {
    let tol = topo.tol;
    match (topo.operand(0), topo.operand(1)) {
        (Steric::Point(p), g @ Steric::Polygon(_)) => locate(*p, g, tol) != Location::Interior,
        (a @ Steric::Line(_), Steric::Polygon(rings)) => {
            classify(a, rings, tol).1 == InPolygon::OnlyOut
        }
        (a @ Steric::Polygon(ra), b @ Steric::Polygon(rb)) => {
            classify(a, rb, tol).1 == InPolygon::OnlyOut
                && classify(b, ra, tol).1 == InPolygon::OnlyOut
        }
        _ => true,
    }
}

/// DE-9IM of `a` against `b` with default tolerances.
pub fn relate(a: &Steric, b: &Steric) -> Result<IntersectionMatrix> {
    relate_with_cfg(a, b, GeomCfg::default())
}

pub fn relate_with_cfg(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<IntersectionMatrix> {
    relate_report(a, b, cfg).map(|r| r.matrix)
}

/// `relate(a, b)` matched against a `T F * 0 1 2` pattern.
pub fn relate_pattern(a: &Steric, b: &Steric, pattern: &str) -> Result<bool> {
    relate(a, b)?.matches(pattern)
}

/// Full relate evaluation.
pub fn relate_report(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<RelateReport> {
    a.validate()?;
    b.validate()?;
    if a.is_collection() || b.is_collection() {
        return Err(Error::NotSupportCollection { op: "relate" });
    }
    let tol = cfg.eps_equal;
    let swapped = a.dimension() > b.dimension();
    let (x, y) = if swapped { (b, a) } else { (a, b) };
    let pair = ShapePair::of(x.shape(), y.shape())
        .ok_or_else(|| Error::not_match("relate", a.shape(), b.shape()))?;
    let ring = ring_input(x, y, tol);
    let catalogue = Catalogue::global();

    let equal = x.proximity(y, tol).then(|| catalogue.equal(pair)).flatten();
    let (im, shortcut, structure) = match equal {
        Some(im) => (im, Some(Shortcut::Equal), None),
        None => {
            let topo = build_topology(x, y, cfg)?;
            let structure = Structure::of(&topo);
            if topo.intersection.order() == 0 && no_contact(&topo) {
                let im = catalogue.disjoint(pair);
                let im = ring.map_or(im, |r| im.transpose_by_ring(r));
                (im, Some(Shortcut::Disjoint), Some(structure))
            } else {
                let im = synthesize(&topo);
                let im = ring.map_or(im, |r| im.transpose_by_ring(r));
                (im, None, Some(structure))
            }
        }
    };
    let entry = catalogue.explain(pair, &im, ring);
    tracing::debug!(
        ?pair,
        ?shortcut,
        swapped,
        matrix = %im,
        entry = ?entry,
        "relate"
    );
    Ok(RelateReport {
        matrix: if swapped { im.transpose() } else { im },
        pair,
        swapped,
        entry,
        shortcut,
        structure,
    })
}
