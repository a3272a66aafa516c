//! Overlay where at least one operand is a line and none is a point.
//!
//! Line output is never reassembled into rings: kept fragments are either
//! relinked at shared endpoints or returned as they were cut.

use super::link::{link, LinkMode};
use super::{gather, isolated, only_in, Clip};
use crate::error::{Error, Result};
use crate::geom::{Coord, Shape, Steric};
use crate::graph::ShapeClass;
use crate::locate::Location;

/// Index of the line operand when the other one is a polygon.
fn line_side(clip: &Clip) -> Option<usize> {
    match (clip.a().shape(), clip.b().shape()) {
        (Shape::Line, Shape::Polygon) => Some(0),
        (Shape::Polygon, Shape::Line) => Some(1),
        _ => None,
    }
}

fn both_lines(clip: &Clip) -> bool {
    clip.a().shape() == Shape::Line && clip.b().shape() == Shape::Line
}

fn mismatch(op: &'static str, clip: &Clip) -> Error {
    Error::not_match(op, clip.a().shape(), clip.b().shape())
}

/// Fragments owned by operand `k` alone and lying outside the other one.
fn outside(clip: &Clip, k: usize) -> Vec<Vec<Coord>> {
    clip.pieces(|n| only_in(n, k) && n.loc[1 - k] == Location::Exterior)
}

pub fn union(clip: &Clip) -> Result<Steric> {
    let cfg = clip.cfg();
    if both_lines(clip) {
        let im = clip.matrix();
        if im.is_covers() {
            return Ok(clip.a().clone());
        }
        if im.is_covered_by() {
            return Ok(clip.b().clone());
        }
        let mut lines = link(clip.pieces(|n| n.origin[0].is_some()), vec![], LinkMode::Lines, cfg)?;
        lines.extend(link(outside(clip, 1), vec![], LinkMode::Lines, cfg)?);
        return Ok(gather(vec![], lines, vec![]));
    }

    let k = line_side(clip).ok_or_else(|| mismatch("line union", clip))?;
    let polygon = clip.operand(1 - k).clone();
    let lines = link(outside(clip, k), vec![], LinkMode::Lines, cfg)?;
    if lines.is_empty() {
        return Ok(polygon);
    }
    let mut items: Vec<Steric> = lines.into_iter().map(Steric::Line).collect();
    if k == 0 {
        items.push(polygon);
    } else {
        items.insert(0, polygon);
    }
    Ok(Steric::Collection(items))
}

pub fn intersection(clip: &Clip) -> Result<Steric> {
    let cfg = clip.cfg();
    let tol = cfg.eps_equal;
    let kept = if both_lines(clip) {
        clip.pieces(|n| n.class == ShapeClass::Composite)
    } else {
        let k = line_side(clip).ok_or_else(|| mismatch("line intersection", clip))?;
        clip.pieces(|n| {
            n.class == ShapeClass::Composite
                || (n.origin[k].is_some() && n.loc[1 - k] == Location::Interior)
        })
    };
    let lines = link(kept, vec![], LinkMode::Lines, cfg)?;
    let points = isolated(clip.shared_points(), &lines, tol);
    Ok(gather(vec![], lines, points))
}

/// Line minus anything keeps A's outside fragments as cut; a polygon minus a
/// line is the polygon itself.
pub fn difference(clip: &Clip) -> Result<Steric> {
    match (clip.a().shape(), clip.b().shape()) {
        (Shape::Line, Shape::Line | Shape::Polygon) => Ok(gather(vec![], outside(clip, 0), vec![])),
        (Shape::Polygon, Shape::Line) => Ok(clip.a().clone()),
        _ => Err(mismatch("line difference", clip)),
    }
}
