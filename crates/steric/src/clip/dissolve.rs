//! Cut a polygon into parts along a line.
//!
//! The polygon's ring fragments and the line's chords (fragments running
//! through the interior from boundary to boundary) form a planar graph.
//! Faces are traced over its half-edges, turning as far right as possible at
//! each vertex, so every bounded face is walked counterclockwise. Faces with
//! positive area that use at least one shell edge or chord are the parts;
//! holes no chord reaches are nested back into the part holding them.

use super::assemble::assemble;
use super::{only_in, Clip};
use crate::calc::cfg::ACCURACY;
use crate::calc::{coord_eq, point_on_segment};
use crate::error::{Error, Result};
use crate::geom::{signed_area, Coord, GeomCfg, Shape, Steric};
use crate::graph::ChainKind;
use crate::locate::{locate, Location};

struct HalfEdge {
    pts: Vec<Coord>,
    from: usize,
    to: usize,
    angle: f64,
    hole: bool,
}

fn vertex(vertices: &mut Vec<Coord>, p: Coord, tol: f64) -> usize {
    match vertices.iter().position(|q| coord_eq(*q, p, tol)) {
        Some(i) => i,
        None => {
            vertices.push(p);
            vertices.len() - 1
        }
    }
}

fn heading(pts: &[Coord]) -> f64 {
    let d = pts[1] - pts[0];
    d.y.atan2(d.x)
}

/// Half-edges `2i` and `2i + 1` run along edge `i` in opposite directions.
fn half_edges(edges: Vec<(Vec<Coord>, bool)>, tol: f64) -> (Vec<HalfEdge>, Vec<Vec<usize>>) {
    let mut vertices = Vec::new();
    let mut half = Vec::with_capacity(2 * edges.len());
    for (pts, hole) in edges {
        let from = vertex(&mut vertices, pts[0], tol);
        let to = vertex(&mut vertices, pts[pts.len() - 1], tol);
        let back: Vec<Coord> = pts.iter().rev().copied().collect();
        half.push(HalfEdge { angle: heading(&pts), pts, from, to, hole });
        half.push(HalfEdge { angle: heading(&back), pts: back, from: to, to: from, hole });
    }
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    for (h, e) in half.iter().enumerate() {
        outgoing[e.from].push(h);
    }
    for out in &mut outgoing {
        out.sort_by(|a, b| half[*a].angle.total_cmp(&half[*b].angle));
    }
    (half, outgoing)
}

/// Outgoing half-edge clockwise-next from the twin of `h` at `h`'s end.
fn next(half: &[HalfEdge], outgoing: &[Vec<usize>], h: usize) -> usize {
    let out = &outgoing[half[h].to];
    let twin = h ^ 1;
    match out.iter().position(|&o| o == twin) {
        Some(0) | None => out[out.len() - 1],
        Some(i) => out[i - 1],
    }
}

/// Closed face rings that count as parts.
fn faces(half: &[HalfEdge], outgoing: &[Vec<usize>]) -> Vec<Vec<Coord>> {
    let mut seen = vec![false; half.len()];
    let mut rings = Vec::new();
    for start in 0..half.len() {
        if seen[start] {
            continue;
        }
        let mut ring: Vec<Coord> = vec![half[start].pts[0]];
        let mut solid = false;
        let mut closed = false;
        let mut h = start;
        for _ in 0..half.len() {
            seen[h] = true;
            solid |= !half[h].hole;
            ring.extend_from_slice(&half[h].pts[1..]);
            h = next(half, outgoing, h);
            if h == start {
                closed = true;
                break;
            }
            if seen[h] {
                break;
            }
        }
        if !closed {
            tracing::debug!(start, "dissolve face did not close");
            continue;
        }
        let last = ring.len() - 1;
        ring[last] = ring[0];
        if solid && signed_area(&ring) > ACCURACY {
            rings.push(ring);
        }
    }
    rings
}

/// Split `polygon` along `line`. Parts come back as a collection of polygons,
/// largest first.
///
/// Fails with [`Error::UnknownType`] when the line does not cross the
/// polygon's interior from boundary to boundary (disjoint, running along the
/// boundary, or ending inside).
pub fn dissolve(polygon: &Steric, line: &Steric) -> Result<Steric> {
    dissolve_with_cfg(polygon, line, GeomCfg::default())
}

pub fn dissolve_with_cfg(polygon: &Steric, line: &Steric, cfg: GeomCfg) -> Result<Steric> {
    if polygon.shape() != Shape::Polygon || line.shape() != Shape::Line {
        return Err(Error::not_match("dissolve", polygon.shape(), line.shape()));
    }
    let clip = Clip::new(polygon, line, cfg)?;
    if !clip.matrix().is_intersects() {
        return Err(Error::unknown("dissolve: line does not meet the polygon"));
    }
    let tol = cfg.eps_equal;
    let topo = clip.topology();
    let on_boundary = |p: Coord| locate(p, clip.a(), tol) == Location::Boundary;

    let chords: Vec<Vec<Coord>> = clip
        .pieces(|n| only_in(n, 1) && n.loc[0] == Location::Interior)
        .into_iter()
        .filter(|c| on_boundary(c[0]) && on_boundary(c[c.len() - 1]))
        .collect();
    if chords.is_empty() {
        return Err(Error::unknown("dissolve: line does not cut the polygon"));
    }

    let mut edges: Vec<(Vec<Coord>, bool)> = Vec::new();
    for id in topo.chain_nodes() {
        let n = topo.arena.get(id);
        if let (Some(o), Some(pts)) = (n.origin[0], n.chain()) {
            if pts.len() >= 2 {
                edges.push((pts.to_vec(), topo.chains[o.chain].kind == ChainKind::Hole));
            }
        }
    }
    let ends: Vec<Coord> = chords.iter().flat_map(|c| [c[0], c[c.len() - 1]]).collect();
    edges.extend(chords.into_iter().map(|c| (c, false)));

    let (half, outgoing) = half_edges(edges, tol);
    let mut rings = faces(&half, &outgoing);
    // Holes the line never reaches stay whole; nesting puts them back.
    for chain in topo.chains.iter().filter(|c| c.operand == 0 && c.kind == ChainKind::Hole) {
        let reached = ends
            .iter()
            .any(|&p| chain.pts.windows(2).any(|w| point_on_segment(p, w[0], w[1], tol)));
        if !reached {
            rings.push(chain.pts.clone());
        }
    }

    let parts = match assemble(rings, tol) {
        Steric::Collection(parts) => parts,
        single => vec![single],
    };
    tracing::debug!(parts = parts.len(), area = polygon.area(), "dissolve");
    Ok(Steric::Collection(parts))
}
