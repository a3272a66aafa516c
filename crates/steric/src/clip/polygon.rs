//! Polygon/polygon overlay.
//!
//! Ring fragments are kept by their location in the other operand; a shared
//! (composite) fragment is kept when both interiors lie on the same side of
//! it (union, intersection) or on opposite sides (difference). Kept pieces
//! are relinked into rings and nested by [`assemble`].

use super::assemble::assemble;
use super::link::{link, LinkMode};
use super::{gather, isolated, only_in, Clip};
use crate::error::Result;
use crate::geom::{Coord, Steric};
use crate::graph::{Node, ShapeClass};
use crate::locate::Location;

/// Both operands' interiors lie left of the fragment, or both right.
fn same_side(n: &Node) -> bool {
    n.sides.is_some_and(|s| s[0][0] == s[0][1])
}

/// Relink the selected fragments into rings. Composites not selected are the
/// fallback pool for chains that do not close on their own.
fn rings(clip: &Clip, a_loc: Location, b_loc: Location, keep_same_side: bool) -> Result<Steric> {
    let is_composite = |n: &Node| n.class == ShapeClass::Composite;
    let pieces = clip.pieces(|n| {
        if is_composite(n) {
            same_side(n) == keep_same_side
        } else {
            (only_in(n, 0) && n.loc[1] == a_loc) || (only_in(n, 1) && n.loc[0] == b_loc)
        }
    });
    let fallback: Vec<Vec<Coord>> = clip.pieces(|n| is_composite(n) && same_side(n) != keep_same_side);
    let rings = link(pieces, fallback, LinkMode::Rings, clip.cfg())?;
    Ok(assemble(rings, clip.cfg().eps_equal))
}

/// Boundaries meet but interiors do not: the shared edges as lines and the
/// remaining contact points.
fn touching(clip: &Clip) -> Result<Steric> {
    let cfg = clip.cfg();
    let lines = link(clip.pieces(|n| n.class == ShapeClass::Composite), vec![], LinkMode::Lines, cfg)?;
    let points = isolated(clip.shared_points(), &lines, cfg.eps_equal);
    Ok(gather(vec![], lines, points))
}

pub fn union(clip: &Clip) -> Result<Steric> {
    let im = clip.matrix();
    if im.is_covers() {
        return Ok(clip.a().clone());
    }
    if im.is_covered_by() {
        return Ok(clip.b().clone());
    }
    if im.is_disjoint() || im.matches("FF**0****")? {
        return Ok(Steric::Collection(vec![clip.a().clone(), clip.b().clone()]));
    }
    rings(clip, Location::Exterior, Location::Exterior, true)
}

pub fn intersection(clip: &Clip) -> Result<Steric> {
    let im = clip.matrix();
    if im.is_covers() {
        return Ok(clip.b().clone());
    }
    if im.is_covered_by() {
        return Ok(clip.a().clone());
    }
    if im.is_disjoint() {
        return Ok(Steric::empty());
    }
    if im.get(Location::Interior, Location::Interior) < 0 {
        return touching(clip);
    }
    rings(clip, Location::Interior, Location::Interior, true)
}

/// A hole appears when B sits strictly inside A: A's ring is kept whole and
/// B's ring, entirely interior to A, is nested under it.
pub fn difference(clip: &Clip) -> Result<Steric> {
    let im = clip.matrix();
    if im.is_covered_by() {
        return Ok(Steric::empty());
    }
    if im.get(Location::Interior, Location::Interior) < 0 {
        return Ok(clip.a().clone());
    }
    rings(clip, Location::Exterior, Location::Interior, false)
}
