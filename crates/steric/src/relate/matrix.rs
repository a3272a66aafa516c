//! DE-9IM intersection matrix and its named predicates.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::locate::Location;

/// Which operand is a closed line (a ring without boundary).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RingInput {
    First,
    Second,
    Both,
}

/// 3×3 table of intersection dimensions; -1 marks an empty intersection.
///
/// Rows are A's interior, boundary, exterior; columns the same for B.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix {
    cells: [[i8; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

fn dim_char(d: i8) -> char {
    match d {
        0 => '0',
        1 => '1',
        2 => '2',
        _ => 'F',
    }
}

fn cell_matches(d: i8, c: u8) -> bool {
    match c {
        b'*' => true,
        b'T' => d >= 0,
        b'F' => d < 0,
        b'0' => d == 0,
        b'1' => d == 1,
        b'2' => d == 2,
        _ => false,
    }
}

impl IntersectionMatrix {
    /// All cells empty.
    pub const fn new() -> Self {
        Self { cells: [[-1; 3]; 3] }
    }

    #[inline]
    pub fn get(&self, a: Location, b: Location) -> i8 {
        self.cells[a.index()][b.index()]
    }

    #[inline]
    pub fn set(&mut self, a: Location, b: Location, dim: i8) {
        self.cells[a.index()][b.index()] = dim;
    }

    /// Raise the cell to `dim` if it is lower.
    #[inline]
    pub fn set_at_least(&mut self, a: Location, b: Location, dim: i8) {
        let c = &mut self.cells[a.index()][b.index()];
        if *c < dim {
            *c = dim;
        }
    }

    /// Row-major cell `k` in `0..9`.
    #[inline]
    pub fn cell(&self, k: usize) -> i8 {
        self.cells[k / 3][k % 3]
    }

    /// Matrix of `relate(b, a)` given this one for `relate(a, b)`.
    pub fn transpose(&self) -> Self {
        let mut t = Self::new();
        for i in 0..3 {
            for j in 0..3 {
                t.cells[j][i] = self.cells[i][j];
            }
        }
        t
    }

    /// Clear the boundary row/column of closed-line operands.
    pub fn transpose_by_ring(&self, ring: RingInput) -> Self {
        let mut m = *self;
        let b = Location::Boundary.index();
        if matches!(ring, RingInput::First | RingInput::Both) {
            m.cells[b] = [-1; 3];
        }
        if matches!(ring, RingInput::Second | RingInput::Both) {
            for row in m.cells.iter_mut() {
                row[b] = -1;
            }
        }
        m
    }

    /// Match against a 9-character pattern over `T F * 0 1 2`.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let p = pattern.as_bytes();
        if p.len() != 9 || !p.iter().all(|c| b"TF*012".contains(c)) {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
            });
        }
        Ok((0..9).all(|k| cell_matches(self.cell(k), p[k])))
    }

    fn is(&self, pattern: &'static str) -> bool {
        let p = pattern.as_bytes();
        (0..9).all(|k| cell_matches(self.cell(k), p[k]))
    }

    pub fn is_disjoint(&self) -> bool {
        self.is("FF*FF****")
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// Interiors do not meet but the operands do. Never true for two points.
    pub fn is_touches(&self, dim_a: i8, dim_b: i8) -> bool {
        if dim_a == 0 && dim_b == 0 {
            return false;
        }
        self.is("FT*******") || self.is("F**T*****") || self.is("F***T****")
    }

    pub fn is_crosses(&self, dim_a: i8, dim_b: i8) -> bool {
        match dim_a.cmp(&dim_b) {
            std::cmp::Ordering::Less => self.is("T*T******"),
            std::cmp::Ordering::Greater => self.is("T*****T**"),
            std::cmp::Ordering::Equal => dim_a == 1 && self.is("0********"),
        }
    }

    pub fn is_within(&self) -> bool {
        self.is("T*F**F***")
    }

    pub fn is_contains(&self) -> bool {
        self.is("T*****FF*")
    }

    pub fn is_covers(&self) -> bool {
        ["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"]
            .into_iter()
            .any(|p| self.is(p))
    }

    pub fn is_covered_by(&self) -> bool {
        ["T*F**F***", "*TF**F***", "**FT*F***", "**F*TF***"]
            .into_iter()
            .any(|p| self.is(p))
    }

    pub fn is_equals(&self, dim_a: i8, dim_b: i8) -> bool {
        dim_a == dim_b && self.is("T*F**FFF*")
    }

    pub fn is_overlaps(&self, dim_a: i8, dim_b: i8) -> bool {
        if dim_a != dim_b {
            return false;
        }
        match dim_a {
            1 => self.is("1*T***T**"),
            0 | 2 => self.is("T*T***T**"),
            _ => false,
        }
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for k in 0..9 {
            write!(f, "{}", dim_char(self.cell(k)))?;
        }
        Ok(())
    }
}

impl fmt::Debug for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntersectionMatrix({self})")
    }
}

impl FromStr for IntersectionMatrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 9 {
            return Err(Error::InvalidPattern {
                pattern: s.to_string(),
            });
        }
        let mut m = Self::new();
        for (k, c) in bytes.iter().enumerate() {
            m.cells[k / 3][k % 3] = match c {
                b'F' => -1,
                b'0' => 0,
                b'1' => 1,
                b'2' => 2,
                _ => {
                    return Err(Error::InvalidPattern {
                        pattern: s.to_string(),
                    })
                }
            };
        }
        Ok(m)
    }
}
