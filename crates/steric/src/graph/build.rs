//! Graph construction from two atomic operands.
//!
//! Steps
//! 1. Snap B's vertices onto A's (optional), decompose both operands into
//!    chains (line strings and polygon rings).
//! 2. Intersect every A segment with every B segment; every intersection
//!    point is interned once and splits every chain passing through it, so
//!    all chains split at identical coordinates.
//! 3. Cut each chain at its split points into fragments and insert them into
//!    the arena; a fragment inserted by both operands becomes `Composite`.
//! 4. Per-operand graphs link fragments to the point nodes at their ends;
//!    the intersection and union graphs derive from those.
//! 5. Label every node with its location relative to A and B.

use super::intersect::{intersect_segments, SegmentIntersection};
use super::types::{Arena, Graph, NodeId, NodeValue, Origin};
use crate::calc::{coord_eq, point_on_segment, segment_param};
use crate::error::{Error, Result};
use crate::geom::{is_closed_chain, signed_area, Coord, GeomCfg, Steric};
use crate::locate::{locate, Location};

/// Kind of linework a chain comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainKind {
    Line,
    Shell,
    Hole,
}

/// Maximal line/ring component of an operand.
#[derive(Clone, Debug)]
pub struct Chain {
    pub operand: usize,
    pub kind: ChainKind,
    pub closed: bool,
    pub pts: Vec<Coord>,
    /// Polygon interior lies left of the chain direction (rings only).
    pub interior_left: bool,
}

#[derive(Clone, Copy, Debug)]
struct Split {
    seg: usize,
    t: f64,
    at: Coord,
}

/// Both operands with their graphs. Owned by one relate or overlay call.
#[derive(Clone, Debug)]
pub struct Topology {
    pub operands: [Steric; 2],
    pub chains: Vec<Chain>,
    pub arena: Arena,
    /// Per-operand graphs (fragments plus the point nodes they touch).
    pub graphs: [Graph; 2],
    /// Nodes shared by both operands.
    pub intersection: Graph,
    /// All fragments and point nodes.
    pub union: Graph,
    pub tol: f64,
}

impl Topology {
    #[inline]
    pub fn operand(&self, k: usize) -> &Steric {
        &self.operands[k]
    }

    /// Union-graph chain nodes in insertion order (A fragments before B's).
    pub fn chain_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena
            .iter()
            .filter(move |n| n.is_chain() && self.union.contains(n.index))
            .map(|n| n.index)
    }

    /// Point nodes shared by both operands.
    pub fn shared_points(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.intersection
            .nodes()
            .filter(move |&id| self.arena.get(id).is_point())
    }

    #[cfg(debug_assertions)]
    fn debug_dump(&self) {
        if std::env::var_os("STERIC_DEBUG_GRAPH").is_some() {
            for n in self.arena.iter() {
                eprintln!(
                    "[graph] #{} {:?} {:?} deg_u={} loc={:?} {:?}",
                    n.index.0,
                    n.class,
                    n.owner,
                    self.union.degree(n.index),
                    n.loc,
                    n.value
                );
            }
        }
    }
}

fn snap_vertices(b: &Steric, anchors: &[Coord], tol: f64) -> Steric {
    let snap = |p: &Coord| {
        anchors
            .iter()
            .find(|q| coord_eq(*p, **q, tol))
            .copied()
            .unwrap_or(*p)
    };
    match b {
        Steric::Point(p) => Steric::Point(snap(p)),
        Steric::Line(pts) => Steric::Line(pts.iter().map(snap).collect()),
        Steric::Polygon(rings) => Steric::Polygon(
            rings
                .iter()
                .map(|r| r.iter().map(snap).collect())
                .collect(),
        ),
        Steric::Collection(items) => Steric::Collection(
            items
                .iter()
                .map(|s| snap_vertices(s, anchors, tol))
                .collect(),
        ),
    }
}

fn decompose(g: &Steric, operand: usize, tol: f64, out: &mut Vec<Chain>) {
    match g {
        Steric::Point(_) | Steric::Collection(_) => {}
        Steric::Line(pts) => out.push(Chain {
            operand,
            kind: ChainKind::Line,
            closed: is_closed_chain(pts, tol),
            pts: pts.clone(),
            interior_left: false,
        }),
        Steric::Polygon(rings) => {
            for (k, ring) in rings.iter().enumerate() {
                let kind = if k == 0 {
                    ChainKind::Shell
                } else {
                    ChainKind::Hole
                };
                out.push(Chain {
                    operand,
                    kind,
                    closed: true,
                    pts: ring.clone(),
                    interior_left: (signed_area(ring) > 0.0) == (kind == ChainKind::Shell),
                });
            }
        }
    }
}

/// Canonical coordinates of intersection points.
#[derive(Default)]
struct Registry {
    pts: Vec<Coord>,
}

impl Registry {
    fn intern(&mut self, p: Coord, tol: f64) -> Coord {
        if let Some(q) = self.pts.iter().find(|q| coord_eq(p, **q, tol)) {
            return *q;
        }
        self.pts.push(p);
        p
    }
}

fn record(splits: &mut [Vec<Split>], chains: &[Chain], chain: usize, seg: usize, at: Coord) {
    let pts = &chains[chain].pts;
    splits[chain].push(Split {
        seg,
        t: segment_param(at, pts[seg], pts[seg + 1]),
        at,
    });
}

fn boxes_overlap(a0: Coord, a1: Coord, b0: Coord, b1: Coord, tol: f64) -> bool {
    a0.x.min(a1.x) <= b0.x.max(b1.x) + tol
        && b0.x.min(b1.x) <= a0.x.max(a1.x) + tol
        && a0.y.min(a1.y) <= b0.y.max(b1.y) + tol
        && b0.y.min(b1.y) <= a0.y.max(a1.y) + tol
}

fn push_point(seq: &mut Vec<(Coord, bool)>, p: Coord, cut: bool, tol: f64) {
    if let Some(last) = seq.last_mut() {
        if coord_eq(last.0, p, tol) {
            if cut {
                *last = (p, true);
            }
            return;
        }
    }
    seq.push((p, cut));
}

/// Cut a chain at its split points. Closed chains without splits stay whole.
fn split_chain(chain: &Chain, splits: &[Split], tol: f64) -> Vec<Vec<Coord>> {
    let pts = &chain.pts;
    let mut seq: Vec<(Coord, bool)> = Vec::with_capacity(pts.len() + splits.len());
    for (i, &v) in pts.iter().enumerate() {
        match splits.iter().find(|s| coord_eq(s.at, v, tol)) {
            Some(s) => push_point(&mut seq, s.at, true, tol),
            None => push_point(&mut seq, v, false, tol),
        }
        if i + 1 < pts.len() {
            let mut on_seg: Vec<&Split> = splits.iter().filter(|s| s.seg == i).collect();
            on_seg.sort_by(|x, y| x.t.total_cmp(&y.t));
            for s in on_seg {
                if !coord_eq(s.at, v, tol) && !coord_eq(s.at, pts[i + 1], tol) {
                    push_point(&mut seq, s.at, true, tol);
                }
            }
        }
    }
    if chain.closed {
        if seq.len() >= 2 && coord_eq(seq[0].0, seq[seq.len() - 1].0, tol) {
            if let Some((_, last_cut)) = seq.pop() {
                seq[0].1 |= last_cut;
            }
        }
        if seq.len() < 2 {
            return Vec::new();
        }
        match seq.iter().position(|s| s.1) {
            None => {
                let mut ring: Vec<Coord> = seq.iter().map(|s| s.0).collect();
                ring.push(ring[0]);
                return vec![ring];
            }
            Some(k) => {
                seq.rotate_left(k);
                let first = seq[0];
                seq.push(first);
            }
        }
    }
    if seq.len() < 2 {
        return Vec::new();
    }
    let n = seq.len();
    let mut out = Vec::new();
    let mut cur = vec![seq[0].0];
    for (idx, &(p, cut)) in seq.iter().enumerate().skip(1) {
        cur.push(p);
        if cut || idx == n - 1 {
            out.push(std::mem::replace(&mut cur, vec![p]));
        }
    }
    out
}

/// Location of a fragment's relative interior on the operand that owns it.
fn own_location(kind: ChainKind) -> Location {
    match kind {
        ChainKind::Line => Location::Interior,
        ChainKind::Shell | ChainKind::Hole => Location::Boundary,
    }
}

fn label(topo: &mut Topology) {
    let tol = topo.tol;
    let ids: Vec<NodeId> = topo.arena.iter().map(|n| n.index).collect();
    for id in ids {
        let node = topo.arena.get(id);
        let mut loc = [Location::Exterior; 2];
        let mut sides = Some([[Location::Exterior; 2]; 2]);
        match &node.value {
            NodeValue::Point(p) => {
                for (k, l) in loc.iter_mut().enumerate() {
                    *l = locate(*p, &topo.operands[k], tol);
                }
                sides = None;
            }
            NodeValue::Chain(c) => {
                let sample = (c[0] + c[1]) * 0.5;
                for k in 0..2 {
                    let (l, left, right) = match node.origin[k] {
                        Some(o) => {
                            let chain = &topo.chains[o.chain];
                            let l = own_location(chain.kind);
                            if chain.kind == ChainKind::Line {
                                (l, Location::Exterior, Location::Exterior)
                            } else if chain.interior_left == o.forward {
                                (l, Location::Interior, Location::Exterior)
                            } else {
                                (l, Location::Exterior, Location::Interior)
                            }
                        }
                        None => {
                            let l = locate(sample, &topo.operands[k], tol);
                            match (&topo.operands[k], l) {
                                (Steric::Polygon(_), Location::Boundary) => {
                                    // On the ring but not split as shared: side unknown.
                                    sides = None;
                                    (l, l, l)
                                }
                                (Steric::Polygon(_), _) => (l, l, l),
                                _ => (l, Location::Exterior, Location::Exterior),
                            }
                        }
                    };
                    loc[k] = l;
                    if let Some(s) = sides.as_mut() {
                        s[0][k] = left;
                        s[1][k] = right;
                    }
                }
            }
        }
        let node = topo.arena.get_mut(id);
        node.loc = loc;
        node.sides = sides;
    }
}

/// Build the arena and graphs for `a` against `b`.
///
/// Collections are rejected; callers reduce them to atomic operands first.
pub fn build_topology(a: &Steric, b: &Steric, cfg: GeomCfg) -> Result<Topology> {
    if a.is_collection() || b.is_collection() {
        return Err(Error::NotSupportCollection { op: "build_topology" });
    }
    let tol = cfg.eps_equal;
    let b = if cfg.snap {
        snap_vertices(b, &a.coords(), tol)
    } else {
        b.clone()
    };
    let operands = [a.clone(), b];

    let mut chains = Vec::new();
    decompose(&operands[0], 0, tol, &mut chains);
    decompose(&operands[1], 1, tol, &mut chains);
    let mut splits: Vec<Vec<Split>> = vec![Vec::new(); chains.len()];
    let mut registry = Registry::default();

    for i in (0..chains.len()).filter(|&i| chains[i].operand == 0) {
        for j in (0..chains.len()).filter(|&j| chains[j].operand == 1) {
            for sa in 0..chains[i].pts.len().saturating_sub(1) {
                let (a0, a1) = (chains[i].pts[sa], chains[i].pts[sa + 1]);
                for sb in 0..chains[j].pts.len().saturating_sub(1) {
                    let (b0, b1) = (chains[j].pts[sb], chains[j].pts[sb + 1]);
                    if !boxes_overlap(a0, a1, b0, b1, tol) {
                        continue;
                    }
                    let hits = match intersect_segments(a0, a1, b0, b1, tol) {
                        SegmentIntersection::None => continue,
                        SegmentIntersection::Point(p) => vec![p],
                        SegmentIntersection::Overlap(p, q) => vec![p, q],
                    };
                    for p in hits {
                        let p = registry.intern(p, tol);
                        record(&mut splits, &chains, i, sa, p);
                        record(&mut splits, &chains, j, sb, p);
                    }
                }
            }
        }
    }

    // Point operands touching the other operand.
    let mut own_points: [Option<Coord>; 2] = [None, None];
    for k in 0..2 {
        let Steric::Point(p) = operands[k] else {
            continue;
        };
        own_points[k] = Some(p);
        let other = 1 - k;
        if let Steric::Point(q) = operands[other] {
            if coord_eq(p, q, tol) {
                registry.intern(p, tol);
            }
            continue;
        }
        for c in (0..chains.len()).filter(|&c| chains[c].operand == other) {
            for s in 0..chains[c].pts.len().saturating_sub(1) {
                let (s0, s1) = (chains[c].pts[s], chains[c].pts[s + 1]);
                if point_on_segment(p, s0, s1, tol) {
                    let at = registry.intern(p, tol);
                    record(&mut splits, &chains, c, s, at);
                }
            }
        }
    }

    // Every chain passing through an intersection point splits there, not
    // only the two segments that produced it.
    for &p in &registry.pts {
        for c in 0..chains.len() {
            for s in 0..chains[c].pts.len().saturating_sub(1) {
                let (s0, s1) = (chains[c].pts[s], chains[c].pts[s + 1]);
                if point_on_segment(p, s0, s1, tol) {
                    record(&mut splits, &chains, c, s, p);
                }
            }
        }
    }

    let mut arena = Arena::new(tol);
    let mut graphs = [Graph::default(), Graph::default()];
    let mut shared = Vec::with_capacity(registry.pts.len());
    for &p in &registry.pts {
        let (id, _) = arena.insert(NodeValue::Point(p), 0, None);
        arena.insert(NodeValue::Point(p), 1, None);
        graphs[0].add_node(id);
        graphs[1].add_node(id);
        shared.push(id);
    }
    for (k, p) in own_points.iter().enumerate() {
        if let Some(p) = p {
            let (id, _) = arena.insert(NodeValue::Point(*p), k, None);
            graphs[k].add_node(id);
        }
    }
    for (ci, chain) in chains.iter().enumerate() {
        let k = chain.operand;
        for frag in split_chain(chain, &splits[ci], tol) {
            let ends = [frag[0], frag[frag.len() - 1]];
            let origin = Origin {
                chain: ci,
                forward: true,
            };
            let (id, _) = arena.insert(NodeValue::Chain(frag), k, Some(origin));
            graphs[k].add_node(id);
            for end in ends {
                if let Some(pid) = arena.find_point(end).filter(|pid| shared.contains(pid)) {
                    graphs[k].add_edge(id, pid);
                }
            }
        }
    }

    let intersection = graphs[0].intersection(&graphs[1]);
    let union = graphs[0].union(&graphs[1]);
    let mut topo = Topology {
        operands,
        chains,
        arena,
        graphs,
        intersection,
        union,
        tol,
    };
    label(&mut topo);
    tracing::trace!(
        nodes = topo.arena.len(),
        shared = topo.intersection.order(),
        union = topo.union.order(),
        "graph built"
    );
    #[cfg(debug_assertions)]
    topo.debug_dump();
    Ok(topo)
}
