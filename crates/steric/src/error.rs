//! Error taxonomy shared by relate and overlay.
//!
//! Every public entry point validates its operands and returns [`Result`].
//! Variants carry enough context to name the offending routine or shape;
//! none of them is retried internally.

use std::fmt;

use crate::geom::Shape;

/// Errors surfaced by the relate and overlay engines.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A routine was handed a shape combination it does not implement.
    NotMatchType {
        op: &'static str,
        a: Shape,
        b: Shape,
    },
    /// A collection reached a routine that needs an atomic shape.
    NotSupportCollection { op: &'static str },
    /// The operand is not a usable shape for the routine.
    UnknownType { reason: String },
    /// Operand failed validation (too few points, open ring, non-finite coordinate).
    InvalidGeometry { reason: String },
    /// Relinking could not place a fragment within the attempt budget.
    WrongLink { attempts: usize },
    /// A DE-9IM string or match pattern is malformed.
    InvalidPattern { pattern: String },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(reason: impl Into<String>) -> Self {
        Self::UnknownType {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_match(op: &'static str, a: Shape, b: Shape) -> Self {
        Self::NotMatchType { op, a, b }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMatchType { op, a, b } => {
                write!(f, "{op}: shape combination {a:?}/{b:?} is not supported")
            }
            Self::NotSupportCollection { op } => write!(f, "{op}: collections are not supported"),
            Self::UnknownType { reason } => write!(f, "unknown steric type: {reason}"),
            Self::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Self::WrongLink { attempts } => {
                write!(f, "relinking failed to close chains after {attempts} attempts")
            }
            Self::InvalidPattern { pattern } => write!(f, "invalid DE-9IM pattern {pattern:?}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
