//! Matrix synthesis and structural counts over a built [`Topology`].
//!
//! Every labelled piece of the graph witnesses one cell:
//! - a point node at `(loc_A, loc_B)` gives dimension 0,
//! - a fragment gives dimension 1 at its interior locations,
//! - the two sides of a fragment give dimension 2 where both operands have
//!   area on that side (exterior counts as area).
//!
//! Line endpoints that are not graph nodes still witness their own cell.

use crate::geom::Steric;
use crate::graph::{NodeId, NodeValue, ShapeClass, Topology};
use crate::locate::{classify, locate, InPolygon, Location};

use super::matrix::IntersectionMatrix;

/// DE-9IM of the topology's operands in their stored order.
pub fn synthesize(topo: &Topology) -> IntersectionMatrix {
    let mut im = IntersectionMatrix::new();
    im.set(Location::Exterior, Location::Exterior, 2);
    for node in topo.arena.iter() {
        let [la, lb] = node.loc;
        match node.value {
            NodeValue::Point(_) => im.set_at_least(la, lb, 0),
            NodeValue::Chain(_) => {
                im.set_at_least(la, lb, 1);
                if let Some(sides) = node.sides {
                    for [sa, sb] in sides {
                        im.set_at_least(sa, sb, 2);
                    }
                }
            }
        }
    }
    for g in &topo.operands {
        for p in g.boundary_points(topo.tol) {
            let la = locate(p, topo.operand(0), topo.tol);
            let lb = locate(p, topo.operand(1), topo.tol);
            im.set_at_least(la, lb, 0);
        }
    }
    im
}

/// Counts describing how the two operands meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Structure {
    /// Shared point nodes.
    pub n_point: usize,
    /// Shared fragments.
    pub n_line: usize,
    /// Maximal chains of shared fragments.
    pub n_composite: usize,
    /// Max and sum of shared point degrees in the union graph.
    pub max_degree: usize,
    pub sum_degree: usize,
    /// Largest line-degree code (1..=6) over shared fragments; 0 if none.
    pub max_line_degree: u8,
    /// Shared points that are line endpoints of A and B, capped at 2.
    pub have_intersection_vertex: [u8; 2],
    /// Vertex folds of the first operand against the second when the
    /// second is a polygon.
    pub point_class: Option<InPolygon>,
    pub entity_class: Option<InPolygon>,
}

/// Discretized degree of a shared fragment from the plain-line degrees
/// `(d1, d2)` of its two end points.
pub fn line_degree_code(d1: usize, d2: usize) -> u8 {
    match d1 + d2 {
        0 | 1 => 0,
        2 => 1,
        3 => 2,
        4 if d1 == 2 => 4,
        4 => 3,
        5 => 5,
        _ => 6,
    }
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

impl Structure {
    pub fn of(topo: &Topology) -> Structure {
        let arena = &topo.arena;
        let points: Vec<NodeId> = topo.shared_points().collect();
        let composites: Vec<NodeId> = topo
            .intersection
            .nodes()
            .filter(|&id| arena.get(id).class == ShapeClass::Composite)
            .collect();

        let degrees = points.iter().map(|&p| topo.union.degree(p));
        let max_degree = degrees.clone().max().unwrap_or(0);
        let sum_degree = degrees.sum();

        // Plain-line degree of a point: edges of cost POINT_LINE.
        let line_deg = |p: NodeId| {
            topo.union
                .neighbors(p)
                .filter(|&n| arena.get(n).class == ShapeClass::Line)
                .count()
        };
        let max_line_degree = composites
            .iter()
            .map(|&c| {
                let ends: Vec<usize> = topo
                    .union
                    .neighbors(c)
                    .filter(|&n| arena.get(n).is_point())
                    .map(line_deg)
                    .collect();
                match ends.as_slice() {
                    [d1, d2] => line_degree_code(*d1.min(d2), *d1.max(d2)),
                    [d] => line_degree_code(*d, 0),
                    _ => 0,
                }
            })
            .max()
            .unwrap_or(0);

        let mut parent: Vec<usize> = (0..composites.len()).collect();
        for &p in &points {
            let touching: Vec<usize> = composites
                .iter()
                .enumerate()
                .filter(|&(_, &c)| topo.intersection.has_edge(c, p))
                .map(|(k, _)| k)
                .collect();
            for w in touching.windows(2) {
                let (ra, rb) = (find(&mut parent, w[0]), find(&mut parent, w[1]));
                parent[ra] = rb;
            }
        }
        let n_composite = (0..composites.len())
            .filter(|&k| find(&mut parent, k) == k)
            .count();

        let mut have_intersection_vertex = [0u8; 2];
        for (k, hv) in have_intersection_vertex.iter_mut().enumerate() {
            let ends = topo.operand(k).boundary_points(topo.tol);
            let hits = points
                .iter()
                .filter_map(|&p| arena.get(p).coord())
                .filter(|p| ends.iter().any(|e| crate::calc::coord_eq(*p, *e, topo.tol)))
                .count();
            *hv = hits.min(2) as u8;
        }

        let (point_class, entity_class) = match topo.operand(1) {
            Steric::Polygon(rings) => {
                let (pc, ec) = classify(topo.operand(0), rings, topo.tol);
                (Some(pc), Some(ec))
            }
            _ => (None, None),
        };

        Structure {
            n_point: points.len(),
            n_line: composites.len(),
            n_composite,
            max_degree,
            sum_degree,
            max_line_degree,
            have_intersection_vertex,
            point_class,
            entity_class,
        }
    }
}
