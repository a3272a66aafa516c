//! Numeric core: double-double scalar, robust predicates, tolerances.

pub(crate) mod cfg;
mod pair_float;
mod predicates;

pub use pair_float::PairFloat;
pub use predicates::{coord_eq, line_distance, orientation, point_on_segment, segment_param};
