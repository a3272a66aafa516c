//! Overlay with a point operand. No graph is needed: the point's location
//! in the other operand decides everything.

use crate::error::{Error, Result};
use crate::geom::Steric;
use crate::locate::{locate, Location};

fn covered(p: &Steric, by: &Steric, tol: f64) -> Option<bool> {
    match p {
        Steric::Point(c) => Some(locate(*c, by, tol) != Location::Exterior),
        _ => None,
    }
}

fn mismatch(op: &'static str, a: &Steric, b: &Steric) -> Error {
    Error::not_match(op, a.shape(), b.shape())
}

pub fn union(a: &Steric, b: &Steric, tol: f64) -> Result<Steric> {
    let absorbed = match (covered(a, b, tol), covered(b, a, tol)) {
        (Some(true), _) => Some(b),
        (_, Some(true)) => Some(a),
        (None, None) => return Err(mismatch("point union", a, b)),
        _ => None,
    };
    Ok(absorbed.map_or_else(
        || Steric::Collection(vec![a.clone(), b.clone()]),
        Steric::clone,
    ))
}

pub fn intersection(a: &Steric, b: &Steric, tol: f64) -> Result<Steric> {
    match (covered(a, b, tol), covered(b, a, tol)) {
        (Some(true), _) => Ok(a.clone()),
        (_, Some(true)) => Ok(b.clone()),
        (None, None) => Err(mismatch("point intersection", a, b)),
        _ => Ok(Steric::empty()),
    }
}

pub fn difference(a: &Steric, b: &Steric, tol: f64) -> Result<Steric> {
    match (covered(a, b, tol), covered(b, a, tol)) {
        (Some(true), _) => Ok(Steric::empty()),
        (Some(false), _) | (None, Some(_)) => Ok(a.clone()),
        (None, None) => Err(mismatch("point difference", a, b)),
    }
}
