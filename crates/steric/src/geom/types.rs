//! Geometry value types and tolerances.
//!
//! - `Coord`: planar coordinate (`nalgebra::Vector2<f64>`).
//! - `Steric`: closed sum type over point, line string, polygon and collection.
//! - `GeomCfg`: tolerances consumed by relate and overlay.

use nalgebra::Vector2;

use crate::calc::cfg::{DEFAULT_TOLERANCE, LINK_ATTEMPTS, LINK_TOLERANCE};

/// Planar coordinate.
pub type Coord = Vector2<f64>;

/// Geometry value consumed and produced by the kernel.
///
/// Invariants (checked by [`Steric::validate`])
/// - `Line` holds at least two points; it is closed when first equals last.
/// - `Polygon` holds a shell followed by holes; every ring is closed and has
///   at least four points.
/// - An empty `Collection` is the absent geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Steric {
    Point(Coord),
    Line(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
    Collection(Vec<Steric>),
}

/// Shape tag of a `Steric` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Point,
    Line,
    Polygon,
    Collection,
}

impl Shape {
    /// Topological dimension; collections report -1 (mixed).
    pub fn dimension(self) -> i8 {
        match self {
            Shape::Point => 0,
            Shape::Line => 1,
            Shape::Polygon => 2,
            Shape::Collection => -1,
        }
    }
}

impl Steric {
    #[inline]
    pub fn point(x: f64, y: f64) -> Self {
        Steric::Point(Vector2::new(x, y))
    }

    pub fn line<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = [f64; 2]>,
    {
        Steric::Line(pts.into_iter().map(|[x, y]| Vector2::new(x, y)).collect())
    }

    /// Polygon from rings given as `[x, y]` sequences, shell first.
    pub fn polygon<R, P>(rings: R) -> Self
    where
        R: IntoIterator<Item = P>,
        P: IntoIterator<Item = [f64; 2]>,
    {
        Steric::Polygon(
            rings
                .into_iter()
                .map(|r| r.into_iter().map(|[x, y]| Vector2::new(x, y)).collect())
                .collect(),
        )
    }

    /// The absent geometry.
    #[inline]
    pub fn empty() -> Self {
        Steric::Collection(Vec::new())
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        match self {
            Steric::Point(_) => Shape::Point,
            Steric::Line(_) => Shape::Line,
            Steric::Polygon(_) => Shape::Polygon,
            Steric::Collection(_) => Shape::Collection,
        }
    }

    /// Topological dimension; for collections the maximum over members (-1 if empty).
    pub fn dimension(&self) -> i8 {
        match self {
            Steric::Collection(items) => items.iter().map(Steric::dimension).max().unwrap_or(-1),
            other => other.shape().dimension(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Steric::Collection(items) => items.iter().all(Steric::is_empty),
            _ => false,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Steric::Collection(_))
    }

    /// Atomic members in order; nested collections are flattened.
    pub fn flatten(&self) -> Vec<Steric> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<Steric>) {
        match self {
            Steric::Collection(items) => items.iter().for_each(|s| s.flatten_into(out)),
            other => out.push(other.clone()),
        }
    }
}

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Coordinate equality and on-segment tolerance.
    pub eps_equal: f64,
    /// Endpoint matching tolerance while relinking.
    pub eps_link: f64,
    /// Fallback placements allowed before relinking reports `WrongLink`.
    pub max_link_attempts: usize,
    /// Snap vertices of the second operand onto nearby vertices of the first.
    pub snap: bool,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_equal: DEFAULT_TOLERANCE,
            eps_link: LINK_TOLERANCE,
            max_link_attempts: LINK_ATTEMPTS,
            snap: true,
        }
    }
}
