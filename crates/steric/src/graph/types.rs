//! Data types for the geometry graph: node arena and per-instance adjacency.
//!
//! Kept small and explicit so `build` and the relate/overlay consumers read
//! as plain index manipulation.

use std::collections::{BTreeMap, BTreeSet};

use crate::calc::coord_eq;
use crate::geom::Coord;
use crate::locate::Location;

/// Stable node identity inside one [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Shape class of a node. The discriminants are the edge-cost codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    Point = 1,
    Line = 2,
    /// Coincident fragment contributed by both operands.
    Composite = 4,
}

impl ShapeClass {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Edge cost between a point node and a plain line node.
pub const POINT_LINE: u8 = ShapeClass::Point as u8 + ShapeClass::Line as u8;

/// Which operand(s) contributed a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    A,
    B,
    Both,
}

impl Owner {
    fn merge(self, other: Owner) -> Owner {
        if self == other {
            self
        } else {
            Owner::Both
        }
    }

    /// Owner for operand index 0 (A) or 1 (B).
    #[inline]
    pub fn of(operand: usize) -> Owner {
        if operand == 0 {
            Owner::A
        } else {
            Owner::B
        }
    }

    #[inline]
    pub fn has(self, operand: usize) -> bool {
        self == Owner::Both || self == Owner::of(operand)
    }
}

/// Geometric value carried by a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeValue {
    Point(Coord),
    Chain(Vec<Coord>),
}

impl NodeValue {
    fn same(&self, other: &NodeValue, tol: f64) -> Option<bool> {
        match (self, other) {
            (NodeValue::Point(p), NodeValue::Point(q)) => coord_eq(*p, *q, tol).then_some(true),
            (NodeValue::Chain(a), NodeValue::Chain(b)) => {
                if a.len() != b.len() {
                    return None;
                }
                if a.iter().zip(b).all(|(p, q)| coord_eq(*p, *q, tol)) {
                    Some(true)
                } else if a.iter().zip(b.iter().rev()).all(|(p, q)| coord_eq(*p, *q, tol)) {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn first(&self) -> Coord {
        match self {
            NodeValue::Point(p) => *p,
            NodeValue::Chain(c) => c[0],
        }
    }

    pub fn last(&self) -> Coord {
        match self {
            NodeValue::Point(p) => *p,
            NodeValue::Chain(c) => c[c.len() - 1],
        }
    }
}

/// Where a chain node came from: the source chain and whether the node value
/// runs in that chain's direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Origin {
    pub chain: usize,
    pub forward: bool,
}

/// Graph node. Created only by the builder.
#[derive(Clone, Debug)]
pub struct Node {
    pub index: NodeId,
    pub class: ShapeClass,
    pub owner: Owner,
    pub value: NodeValue,
    /// Endpoint-swapped chain, cached for orientation-insensitive lookups.
    pub reverse: Option<Vec<Coord>>,
    /// Source chain per operand (chain nodes only).
    pub origin: [Option<Origin>; 2],
    /// Location of the node's relative interior with respect to A and B.
    pub loc: [Location; 2],
    /// Locations `[wrt A, wrt B]` on the left and right side of a chain node,
    /// when both are known.
    pub sides: Option<[[Location; 2]; 2]>,
}

impl Node {
    pub fn is_point(&self) -> bool {
        self.class == ShapeClass::Point
    }

    pub fn is_chain(&self) -> bool {
        !self.is_point()
    }

    pub fn chain(&self) -> Option<&[Coord]> {
        match &self.value {
            NodeValue::Chain(c) => Some(c),
            NodeValue::Point(_) => None,
        }
    }

    pub fn coord(&self) -> Option<Coord> {
        match &self.value {
            NodeValue::Point(p) => Some(*p),
            NodeValue::Chain(_) => None,
        }
    }
}

/// Owning store for nodes; graphs refer to nodes by [`NodeId`].
#[derive(Clone, Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    tol: f64,
}

impl Arena {
    pub fn new(tol: f64) -> Self {
        Self {
            nodes: Vec::new(),
            tol,
        }
    }

    /// Insert a value for `operand`, deduplicating by value or reverse.
    ///
    /// Returns the node id and whether the stored value runs in the same
    /// direction as `value`. A chain inserted by both operands becomes
    /// `Composite`.
    ///
    /// Nodes are point sets: a chain that runs back over one of its own
    /// fragments collapses into that fragment's node, so overlay output
    /// measures such a stretch once.
    pub fn insert(&mut self, value: NodeValue, operand: usize, origin: Option<Origin>) -> (NodeId, bool) {
        let owner = Owner::of(operand);
        if let Some((id, forward)) = self.find(&value) {
            let node = &mut self.nodes[id.0];
            let merged = node.owner.merge(owner);
            if node.is_chain() && merged == Owner::Both {
                node.class = ShapeClass::Composite;
            }
            node.owner = merged;
            if node.origin[operand].is_none() {
                node.origin[operand] = origin.map(|o| Origin {
                    chain: o.chain,
                    forward: o.forward == forward,
                });
            }
            return (id, forward);
        }
        let id = NodeId(self.nodes.len());
        let (class, reverse) = match &value {
            NodeValue::Point(_) => (ShapeClass::Point, None),
            NodeValue::Chain(c) => (ShapeClass::Line, Some(c.iter().rev().copied().collect())),
        };
        let mut node_origin = [None, None];
        node_origin[operand] = origin;
        self.nodes.push(Node {
            index: id,
            class,
            owner,
            value,
            reverse,
            origin: node_origin,
            loc: [Location::Exterior; 2],
            sides: None,
        });
        (id, true)
    }

    /// Look up a node by value or reverse.
    pub fn find(&self, value: &NodeValue) -> Option<(NodeId, bool)> {
        self.nodes
            .iter()
            .find_map(|n| n.value.same(value, self.tol).map(|fwd| (n.index, fwd)))
    }

    /// Point node at `p`, if any.
    pub fn find_point(&self, p: Coord) -> Option<NodeId> {
        self.find(&NodeValue::Point(p)).map(|(id, _)| id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

/// One graph instance: a node set plus undirected adjacency over an arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    adj: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Graph {
    pub fn add_node(&mut self, id: NodeId) {
        self.adj.entry(id).or_default();
    }

    /// Remove the node and its edges.
    pub fn delete_node(&mut self, id: NodeId) {
        if let Some(nbrs) = self.adj.remove(&id) {
            for n in nbrs {
                if let Some(set) = self.adj.get_mut(&n) {
                    set.remove(&id);
                }
            }
        }
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            self.add_node(a);
            return;
        }
        self.adj.entry(a).or_default().insert(b);
        self.adj.entry(b).or_default().insert(a);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.adj.contains_key(&id)
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adj.get(&a).is_some_and(|s| s.contains(&b))
    }

    /// Number of adjacent nodes (0 for absent nodes).
    pub fn degree(&self, id: NodeId) -> usize {
        self.adj.get(&id).map_or(0, BTreeSet::len)
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.adj.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adj.keys().copied()
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj.get(&id).into_iter().flatten().copied()
    }

    /// Edges as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adj
            .iter()
            .flat_map(|(&a, set)| set.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
    }

    /// Edge cost: sum of the two endpoint class codes.
    pub fn edge_cost(&self, arena: &Arena, a: NodeId, b: NodeId) -> Option<u8> {
        self.has_edge(a, b)
            .then(|| arena.get(a).class.code() + arena.get(b).class.code())
    }

    /// Nodes and edges of either graph.
    pub fn union(&self, other: &Graph) -> Graph {
        let mut g = self.clone();
        for id in other.nodes() {
            g.add_node(id);
        }
        for (a, b) in other.edges() {
            g.add_edge(a, b);
        }
        g
    }

    /// Nodes present in both graphs; edges present in both.
    pub fn intersection(&self, other: &Graph) -> Graph {
        let mut g = Graph::default();
        for id in self.nodes().filter(|&id| other.contains(id)) {
            g.add_node(id);
        }
        for (a, b) in self.edges().filter(|&(a, b)| other.has_edge(a, b)) {
            g.add_edge(a, b);
        }
        g
    }

    /// Edges of `self` missing from `other`. Nodes left without edges are
    /// dropped unless they were isolated in `self` and absent from `other`.
    pub fn difference(&self, other: &Graph) -> Graph {
        let mut g = Graph::default();
        for (a, b) in self.edges().filter(|&(a, b)| !other.has_edge(a, b)) {
            g.add_edge(a, b);
        }
        for id in self.nodes() {
            if self.degree(id) == 0 && !other.contains(id) {
                g.add_node(id);
            }
        }
        g
    }

    pub fn sym_difference(&self, other: &Graph) -> Graph {
        self.union(other).difference(&self.intersection(other))
    }
}
