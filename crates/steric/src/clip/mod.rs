//! Boolean overlay: union, intersection, difference and symmetric difference.
//!
//! Purpose
//! - Combine two `Steric` values into a new one, for every pairing of point,
//!   line, polygon and collection.
//!
//! Model
//! - Atomic pairs go through a [`Clip`]: the labelled graph of both operands
//!   plus their DE-9IM. Containment, covering and disjointness short-circuit;
//!   otherwise fragments are kept by location and relinked.
//! - Collections are reduced part by part. Union absorbs a new part into an
//!   existing one whenever their union is atomic; `unary_union` halves its
//!   input recursively.
//! - The empty collection is the absent geometry: identity for union,
//!   absorbing for intersection.
//! - `dissolve` cuts a polygon into parts along a line, reusing the same
//!   graph and ring assembly.

mod assemble;
mod dissolve;
mod link;
mod line;
mod point;
mod polygon;

pub use assemble::assemble;
pub use dissolve::{dissolve, dissolve_with_cfg};
pub use link::{link, LinkMode};

use std::fmt;

use crate::calc::coord_eq;
use crate::error::{Error, Result};
use crate::geom::{Coord, GeomCfg, Shape, Steric};
use crate::graph::{build_topology, Node, ShapeClass, Topology};
use crate::relate::{synthesize, IntersectionMatrix};

/// Overlay operation selector for [`overlay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayOp {
    Union,
    Intersection,
    Difference,
    SymDifference,
}

impl OverlayOp {
    pub const ALL: [OverlayOp; 4] = [
        OverlayOp::Union,
        OverlayOp::Intersection,
        OverlayOp::Difference,
        OverlayOp::SymDifference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OverlayOp::Union => "union",
            OverlayOp::Intersection => "intersection",
            OverlayOp::Difference => "difference",
            OverlayOp::SymDifference => "sym_difference",
        }
    }
}

impl fmt::Display for OverlayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two atomic operands with their labelled graph and DE-9IM, owned by one
/// overlay call.
#[derive(Clone, Debug)]
pub struct Clip {
    topo: Topology,
    matrix: IntersectionMatrix,
    cfg: GeomCfg,
}

impl Clip {
    pub fn new(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Self> {
        a.validate()?;
        b.validate()?;
        if a.is_collection() || b.is_collection() {
            return Err(Error::NotSupportCollection { op: "clip" });
        }
        let topo = build_topology(a, b, cfg)?;
        let matrix = synthesize(&topo);
        Ok(Self { topo, matrix, cfg })
    }

    #[inline]
    pub fn a(&self) -> &Steric {
        self.topo.operand(0)
    }

    /// Second operand, after vertex snapping.
    #[inline]
    pub fn b(&self) -> &Steric {
        self.topo.operand(1)
    }

    #[inline]
    pub fn operand(&self, k: usize) -> &Steric {
        self.topo.operand(k)
    }

    #[inline]
    pub fn matrix(&self) -> IntersectionMatrix {
        self.matrix
    }

    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    #[inline]
    pub fn cfg(&self) -> GeomCfg {
        self.cfg
    }

    /// Coordinates of the union-graph fragments accepted by `keep`.
    pub fn pieces(&self, keep: impl Fn(&Node) -> bool) -> Vec<Vec<Coord>> {
        self.topo
            .chain_nodes()
            .map(|id| self.topo.arena.get(id))
            .filter(|n| keep(n))
            .filter_map(|n| n.chain().map(<[Coord]>::to_vec))
            .collect()
    }

    /// Coordinates of the point nodes shared by both operands.
    pub fn shared_points(&self) -> Vec<Coord> {
        self.topo
            .shared_points()
            .filter_map(|id| self.topo.arena.get(id).coord())
            .collect()
    }

    fn has_point(&self) -> bool {
        self.a().shape() == Shape::Point || self.b().shape() == Shape::Point
    }

    fn is_areal(&self) -> bool {
        self.a().shape() == Shape::Polygon && self.b().shape() == Shape::Polygon
    }

    pub fn union(&self) -> Result<Steric> {
        if self.has_point() {
            point::union(self.a(), self.b(), self.cfg.eps_equal)
        } else if self.is_areal() {
            polygon::union(self)
        } else {
            line::union(self)
        }
    }

    pub fn intersection(&self) -> Result<Steric> {
        if self.has_point() {
            point::intersection(self.a(), self.b(), self.cfg.eps_equal)
        } else if self.is_areal() {
            polygon::intersection(self)
        } else {
            line::intersection(self)
        }
    }

    pub fn difference(&self) -> Result<Steric> {
        if self.has_point() {
            point::difference(self.a(), self.b(), self.cfg.eps_equal)
        } else if self.is_areal() {
            polygon::difference(self)
        } else {
            line::difference(self)
        }
    }

    pub fn sym_difference(&self) -> Result<Steric> {
        sym_difference_any(self.a(), self.b(), self.cfg)
    }
}

/// Fragment contributed by operand `k` and not shared with the other one.
pub(crate) fn only_in(n: &Node, k: usize) -> bool {
    n.class != ShapeClass::Composite && n.origin[k].is_some()
}

/// Points not already carried by an output line.
pub(crate) fn isolated(points: Vec<Coord>, lines: &[Vec<Coord>], tol: f64) -> Vec<Coord> {
    points
        .into_iter()
        .filter(|p| !lines.iter().flatten().any(|q| coord_eq(*p, *q, tol)))
        .collect()
}

/// Polygons, then lines, then points; a single item is returned bare.
pub(crate) fn gather(polygons: Vec<Steric>, lines: Vec<Vec<Coord>>, points: Vec<Coord>) -> Steric {
    let items: Vec<Steric> = polygons
        .into_iter()
        .chain(lines.into_iter().map(Steric::Line))
        .chain(points.into_iter().map(Steric::Point))
        .collect();
    collect(items)
}

fn collect(mut items: Vec<Steric>) -> Steric {
    match items.len() {
        1 => items.remove(0),
        _ => Steric::Collection(items),
    }
}

fn atomic(a: &Steric, b: &Steric, op: OverlayOp, cfg: GeomCfg) -> Result<Steric> {
    let clip = Clip::new(a, b, cfg)?;
    match op {
        OverlayOp::Union => clip.union(),
        OverlayOp::Intersection => clip.intersection(),
        OverlayOp::Difference => clip.difference(),
        OverlayOp::SymDifference => clip.sym_difference(),
    }
}

/// Merge `item` into `parts`: a part whose union with `item` is atomic is
/// replaced by that union, which is then absorbed again.
fn absorb(parts: &mut Vec<Steric>, item: Steric, cfg: GeomCfg) -> Result<()> {
    for i in 0..parts.len() {
        let merged = atomic(&parts[i], &item, OverlayOp::Union, cfg)?;
        if !merged.is_collection() {
            parts.remove(i);
            return absorb(parts, merged, cfg);
        }
    }
    parts.push(item);
    Ok(())
}

fn union_any(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    if a.is_empty() {
        return Ok(b.clone());
    }
    if b.is_empty() {
        return Ok(a.clone());
    }
    if !a.is_collection() && !b.is_collection() {
        return atomic(a, b, OverlayOp::Union, cfg);
    }
    let mut parts = a.flatten();
    for item in b.flatten() {
        absorb(&mut parts, item, cfg)?;
    }
    Ok(collect(parts))
}

fn intersection_any(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    if a.is_empty() || b.is_empty() {
        return Ok(Steric::empty());
    }
    if !a.is_collection() && !b.is_collection() {
        return atomic(a, b, OverlayOp::Intersection, cfg);
    }
    let mut parts = Vec::new();
    for pa in a.flatten() {
        for pb in b.flatten() {
            for item in atomic(&pa, &pb, OverlayOp::Intersection, cfg)?.flatten() {
                absorb(&mut parts, item, cfg)?;
            }
        }
    }
    Ok(collect(parts))
}

fn difference_any(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    if a.is_empty() {
        return Ok(Steric::empty());
    }
    if b.is_empty() {
        return Ok(a.clone());
    }
    if !a.is_collection() && !b.is_collection() {
        return atomic(a, b, OverlayOp::Difference, cfg);
    }
    let mut rest = a.flatten();
    for pb in b.flatten() {
        let mut next = Vec::with_capacity(rest.len());
        for pa in &rest {
            next.extend(atomic(pa, &pb, OverlayOp::Difference, cfg)?.flatten());
        }
        rest = next;
    }
    Ok(collect(rest))
}

fn sym_difference_any(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    let ab = difference_any(a, b, cfg)?;
    let ba = difference_any(b, a, cfg)?;
    if ab.is_empty() {
        return Ok(ba);
    }
    if ba.is_empty() {
        return Ok(ab);
    }
    union_any(&ab, &ba, cfg)
}

/// Run `op` on `a` and `b`, accepting collections on either side.
pub fn overlay(a: &Steric, b: &Steric, op: OverlayOp, cfg: GeomCfg) -> Result<Steric> {
    a.validate()?;
    b.validate()?;
    let out = match op {
        OverlayOp::Union => union_any(a, b, cfg),
        OverlayOp::Intersection => intersection_any(a, b, cfg),
        OverlayOp::Difference => difference_any(a, b, cfg),
        OverlayOp::SymDifference => sym_difference_any(a, b, cfg),
    };
    match &out {
        Ok(g) => tracing::debug!(
            %op,
            a = ?a.shape(),
            b = ?b.shape(),
            out = ?g.shape(),
            parts = g.flatten().len(),
            "overlay"
        ),
        Err(e) => tracing::debug!(%op, error = %e, "overlay failed"),
    }
    out
}

pub fn union(a: &Steric, b: &Steric) -> Result<Steric> {
    overlay(a, b, OverlayOp::Union, GeomCfg::default())
}

pub fn union_with_cfg(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    overlay(a, b, OverlayOp::Union, cfg)
}

pub fn intersection(a: &Steric, b: &Steric) -> Result<Steric> {
    overlay(a, b, OverlayOp::Intersection, GeomCfg::default())
}

pub fn intersection_with_cfg(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    overlay(a, b, OverlayOp::Intersection, cfg)
}

pub fn difference(a: &Steric, b: &Steric) -> Result<Steric> {
    overlay(a, b, OverlayOp::Difference, GeomCfg::default())
}

pub fn difference_with_cfg(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    overlay(a, b, OverlayOp::Difference, cfg)
}

pub fn sym_difference(a: &Steric, b: &Steric) -> Result<Steric> {
    overlay(a, b, OverlayOp::SymDifference, GeomCfg::default())
}

pub fn sym_difference_with_cfg(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Steric> {
    overlay(a, b, OverlayOp::SymDifference, cfg)
}

fn halve(parts: &[Steric], cfg: GeomCfg) -> Result<Steric> {
    match parts.len() {
        0 => Ok(Steric::empty()),
        1 => Ok(parts[0].clone()),
        n => {
            let (left, right) = parts.split_at(n / 2);
            union_any(&halve(left, cfg)?, &halve(right, cfg)?, cfg)
        }
    }
}

/// Union of all members of a collection.
pub fn unary_union(g: &Steric) -> Result<Steric> {
    unary_union_with_cfg(g, GeomCfg::default())
}

pub fn unary_union_with_cfg(g: &Steric, cfg: GeomCfg) -> Result<Steric> {
    g.validate()?;
    if !g.is_collection() {
        return Err(Error::unknown(format!(
            "unary_union expects a collection, got {:?}",
            g.shape()
        )));
    }
    halve(&g.flatten(), cfg)
}

/// Join lines that share endpoints into longer lines.
pub fn line_merge(g: &Steric) -> Result<Steric> {
    line_merge_with_cfg(g, GeomCfg::default())
}

pub fn line_merge_with_cfg(g: &Steric, cfg: GeomCfg) -> Result<Steric> {
    g.validate()?;
    let mut pieces = Vec::new();
    for part in g.flatten() {
        match part {
            Steric::Line(pts) => pieces.push(pts),
            other => return Err(Error::not_match("line_merge", other.shape(), Shape::Line)),
        }
    }
    let lines = link(pieces, Vec::new(), LinkMode::Lines, cfg)?;
    Ok(gather(Vec::new(), lines, Vec::new()))
}

#[cfg(test)]
mod tests;
