//! Planar geometry kernel: DE-9IM relate and boolean overlay.
//!
//! Layout
//! - `calc`: double-double scalar and orientation predicates.
//! - `geom`: the `Steric` value type, measures, random operands.
//! - `locate`: point-in-geometry and vertex-fold classification.
//! - `graph`: fragment graph of two operands (arena + adjacency).
//! - `relate`: intersection matrix, catalogue of named patterns.
//! - `clip`: union, intersection, difference, symmetric difference, dissolve.
//!
//! API Policy
//! - Every public operation validates its operands and returns [`Result`].
//! - Default tolerances come from [`GeomCfg::default`]; each operation has a
//!   `*_with_cfg` form taking an explicit [`GeomCfg`].
//! - The library emits `tracing` events and never installs a subscriber.

pub mod calc;
pub mod clip;
pub mod error;
pub mod geom;
pub mod graph;
pub mod locate;
pub mod relate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use clip::{
    difference, difference_with_cfg, dissolve, dissolve_with_cfg, intersection,
    intersection_with_cfg, line_merge, line_merge_with_cfg, overlay, sym_difference,
    sym_difference_with_cfg, unary_union, unary_union_with_cfg, union, union_with_cfg, Clip,
    OverlayOp,
};
pub use error::{Error, Result};
pub use geom::{Coord, GeomCfg, Shape, Steric};
pub use locate::Location;
pub use relate::{
    relate, relate_pattern, relate_report, relate_with_cfg, IntersectionMatrix, RelateReport,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::clip::{
        difference, dissolve, intersection, overlay, sym_difference, union, OverlayOp,
    };
    pub use crate::geom::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::geom::{Coord, GeomCfg, Shape, Steric};
    pub use crate::relate::{relate, relate_pattern, IntersectionMatrix};
    pub use crate::{Error, Result};
}
