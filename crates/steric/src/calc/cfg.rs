//! Tolerance defaults (internal).
//!
//! Policy
//! - Defaults are fixed constants; `GeomCfg` copies them so callers can
//!   override per call without touching shared state.

/// Coordinate equality and point-on-segment tolerance.
pub(crate) const DEFAULT_TOLERANCE: f64 = 1e-10;
/// Rings whose absolute area falls below this are treated as degenerate.
pub(crate) const ACCURACY: f64 = 1e-12;
/// Endpoint matching tolerance while relinking fragments.
pub(crate) const LINK_TOLERANCE: f64 = 4e-10;
/// Relinking gives up after this many fallback placements.
pub(crate) const LINK_ATTEMPTS: usize = 100;
