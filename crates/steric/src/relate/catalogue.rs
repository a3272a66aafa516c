//! Canonical DE-9IM patterns per shape pair.
//!
//! Entries are named `R<pair><n>` (e.g. `RLA24`) and always describe the
//! dimension-ascending orientation: the lower-dimensional operand is A.
//! Entry 1 of every pair is its disjoint pattern. Repeated patterns within
//! a pair are detected when the table is built; the first entry wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use super::matrix::{IntersectionMatrix, RingInput};
use crate::geom::Shape;

/// Unordered shape pair in dimension-ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapePair {
    PointPoint,
    PointLine,
    PointPolygon,
    LineLine,
    LinePolygon,
    PolygonPolygon,
}

impl ShapePair {
    /// Pair for two atomic shapes in either order; `None` for collections.
    pub fn of(a: Shape, b: Shape) -> Option<ShapePair> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Some(match (lo, hi) {
            (Shape::Point, Shape::Point) => ShapePair::PointPoint,
            (Shape::Point, Shape::Line) => ShapePair::PointLine,
            (Shape::Point, Shape::Polygon) => ShapePair::PointPolygon,
            (Shape::Line, Shape::Line) => ShapePair::LineLine,
            (Shape::Line, Shape::Polygon) => ShapePair::LinePolygon,
            (Shape::Polygon, Shape::Polygon) => ShapePair::PolygonPolygon,
            _ => return None,
        })
    }

    fn tag(self) -> &'static str {
        match self {
            ShapePair::PointPoint => "PP",
            ShapePair::PointLine => "PL",
            ShapePair::PointPolygon => "PA",
            ShapePair::LineLine => "LL",
            ShapePair::LinePolygon => "LA",
            ShapePair::PolygonPolygon => "AA",
        }
    }
}

const TABLE: &[(ShapePair, &[&str])] = &[
    (ShapePair::PointPoint, &["FF0FFF0F2", "0FFFFFFF2"]),
    (ShapePair::PointLine, &["FF0FFF102", "0FFFFF102", "F0FFFF102"]),
    (ShapePair::PointPolygon, &["FF0FFF212", "0FFFFF212", "F0FFFF212"]),
    (
        ShapePair::LineLine,
        &[
            "FF1FF0102", "0F1FF0102", "1F1FF0102", "F01FF0102", "F01FF0102",
            "001FF0102", "001FF01F2", "1F10F0102", "1F10FF102", "1FF0FF102",
            "F010FF102", "F010F0102", "F010F0102", "0010FF102", "0010F0102",
            "0010F0102", "1010FF102", "1010F0102", "1010FF102", "FF1F0F102",
            "FF1F00102", "0F1F0F102", "0F1F00102", "1F1F0F102", "1FFF0F102",
            "1F1F00102", "F01F00102", "001F00102", "1F100F102", "1FF00F102",
            "F0100F102", "00100F102", "10100F102", "FF10F0102", "0F10FF102",
        ],
    ),
    (
        ShapePair::LinePolygon,
        &[
            "FF1FF0212", "1FF0FF212", "F01FF0212", "F11FF0212", "10F0FF212",
            "11F0F0212", "101FF0212", "1010F0212", "1010FF212", "111FF0212",
            "1110FF212", "1110F0212", "FF1F0F212", "FF1F00212", "1FF00F212",
            "1FFF0F212", "F11F0F212", "F11F00212", "10FF0F212", "101F00212",
            "101F00212", "10F00F212", "10100F212", "F1FF0F212", "F11F0F212",
            "F11F00212", "11FF0F212", "101F0F212", "1F1F00212", "11F00F212",
            "11100F212",
        ],
    ),
    (
        ShapePair::PolygonPolygon,
        &[
            "FF2FF1212", "FF2F01212", "FF2F11212", "212101212", "212FF1FF2",
            "2FF1FF212", "2F2F01FF2", "2FF10F212", "2FFF1FFF2", "2FF11F212",
            "212F11FF2",
        ],
    ),
];

/// One named catalogue pattern.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub pair: ShapePair,
    /// 1-based position within the pair.
    pub ordinal: usize,
    pub matrix: IntersectionMatrix,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}{}", self.pair.tag(), self.ordinal)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}={}", self.matrix)
    }
}

/// The pattern table with duplicate bookkeeping.
#[derive(Debug)]
pub struct Catalogue {
    entries: Vec<Entry>,
    /// `(kept, shadowed)` pairs sharing one pattern.
    duplicates: Vec<(Entry, Entry)>,
    index: HashMap<(ShapePair, IntersectionMatrix), Entry>,
}

impl Catalogue {
    fn build() -> Catalogue {
        let mut entries = Vec::new();
        let mut duplicates = Vec::new();
        let mut index = HashMap::new();
        for (pair, patterns) in TABLE {
            for (k, pattern) in patterns.iter().enumerate() {
                // The table is a compile-time literal over F/0/1/2.
                let Ok(matrix) = pattern.parse::<IntersectionMatrix>() else {
                    continue;
                };
                let entry = Entry {
                    pair: *pair,
                    ordinal: k + 1,
                    matrix,
                };
                match index.get(&(*pair, matrix)) {
                    Some(kept) => duplicates.push((*kept, entry)),
                    None => {
                        index.insert((*pair, matrix), entry);
                    }
                }
                entries.push(entry);
            }
        }
        if !duplicates.is_empty() {
            tracing::trace!(count = duplicates.len(), "catalogue duplicates resolved to first entry");
        }
        Catalogue {
            entries,
            duplicates,
            index,
        }
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static Catalogue {
        static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();
        CATALOGUE.get_or_init(Catalogue::build)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn duplicates(&self) -> &[(Entry, Entry)] {
        &self.duplicates
    }

    /// Entries of one shape pair in table order.
    pub fn pair(&self, pair: ShapePair) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.pair == pair)
    }

    /// Disjoint pattern of `pair` (its first entry).
    pub fn disjoint(&self, pair: ShapePair) -> IntersectionMatrix {
        self.pair(pair)
            .next()
            .map_or_else(IntersectionMatrix::new, |e| e.matrix)
    }

    /// Equality pattern, for pairs whose equality is a catalogue entry.
    pub fn equal(&self, pair: ShapePair) -> Option<IntersectionMatrix> {
        let ordinal = match pair {
            ShapePair::PointPoint => 2,
            ShapePair::PolygonPolygon => 9,
            _ => return None,
        };
        self.pair(pair).find(|e| e.ordinal == ordinal).map(|e| e.matrix)
    }

    /// First entry describing `im` (given in dimension-ascending order).
    ///
    /// With `ring` set, entries are compared after clearing the ring
    /// operand's boundary cells.
    pub fn explain(
        &self,
        pair: ShapePair,
        im: &IntersectionMatrix,
        ring: Option<RingInput>,
    ) -> Option<Entry> {
        match ring {
            None => self.index.get(&(pair, *im)).copied(),
            Some(r) => self
                .pair(pair)
                .find(|e| e.matrix.transpose_by_ring(r) == *im)
                .copied(),
        }
    }
}
