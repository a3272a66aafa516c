//! Geometry values: the `Steric` sum type, measures and random operands.
//!
//! Purpose
//! - Own the in-memory representation every other module consumes.
//! - Keep validation and tolerant equality next to the type so relate and
//!   overlay can reject malformed input before building graphs.

mod ops;
pub mod rand;
mod types;

pub use ops::{is_closed_chain, ring_equal, signed_area};
pub use types::{Coord, GeomCfg, Shape, Steric};
