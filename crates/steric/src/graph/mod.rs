//! Geometry graph: fragments and intersection points of two operands.
//!
//! Purpose
//! - Split both operands at every mutual intersection so that shared
//!   linework is represented once (`Composite` nodes) and crossings become
//!   shared point nodes.
//! - Provide the per-operand, intersection and union graphs consumed by
//!   relate and overlay.
//!
//! Model
//! - Nodes live in an [`Arena`] and are addressed by [`NodeId`]; graphs hold
//!   only adjacency. Edge cost is the sum of the endpoint shape-class codes.
//! - Every node carries its location relative to both operands and, for
//!   chain nodes, the locations on its left and right side.

mod build;
mod intersect;
mod types;

pub use build::{build_topology, Chain, ChainKind, Topology};
pub use intersect::{intersect_segments, SegmentIntersection};
pub use types::{Arena, Graph, Node, NodeId, NodeValue, Origin, Owner, ShapeClass, POINT_LINE};
