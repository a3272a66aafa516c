//! Nest closed rings into polygons.
//!
//! Relinked rings may pass through a vertex twice where parts of the result
//! touch; they are split there into simple loops first. Rings are then
//! sorted by area, largest first. A ring's parent is the smallest
//! ring containing it; even nesting depth makes a shell, odd depth a hole of
//! its parent. Shells are emitted counterclockwise, holes clockwise.

use crate::calc::cfg::ACCURACY;
use crate::calc::coord_eq;
use crate::geom::{signed_area, Coord, Steric};
use crate::locate::point_in_ring;

/// `inner` lies inside `outer`, judged by the first vertex (or segment
/// midpoint) not on `outer`.
fn ring_inside(inner: &[Coord], outer: &[Coord], tol: f64) -> bool {
    let mids = inner.windows(2).map(|w| (w[0] + w[1]) * 0.5);
    for p in inner.iter().copied().chain(mids) {
        match point_in_ring(p, outer, tol) {
            (_, true) => continue,
            (inside, false) => return inside,
        }
    }
    false
}

/// Split a closed ring at repeated vertices into loops that visit each
/// vertex once. Back-and-forth spikes (loops of fewer than four points)
/// vanish.
fn split_pinched(ring: Vec<Coord>, tol: f64) -> Vec<Vec<Coord>> {
    let mut loops = Vec::new();
    let mut path: Vec<Coord> = Vec::with_capacity(ring.len());
    for p in ring {
        match path.iter().position(|q| coord_eq(*q, p, tol)) {
            Some(i) => {
                let mut lp = path.split_off(i);
                lp.push(p);
                if lp.len() >= 4 {
                    loops.push(lp);
                }
                path.push(p);
            }
            None => path.push(p),
        }
    }
    loops
}

fn oriented(mut ring: Vec<Coord>, ccw: bool) -> Vec<Coord> {
    if (signed_area(&ring) > 0.0) != ccw {
        ring.reverse();
    }
    ring
}

/// Polygon, collection of polygons, or the empty geometry.
pub fn assemble(rings: Vec<Vec<Coord>>, tol: f64) -> Steric {
    let mut rings: Vec<(Vec<Coord>, f64)> = rings
        .into_iter()
        .filter(|r| r.len() >= 4)
        .flat_map(|r| split_pinched(r, tol))
        .map(|r| {
            let area = signed_area(&r).abs();
            (r, area)
        })
        .filter(|(_, area)| *area > ACCURACY)
        .collect();
    rings.sort_by(|a, b| b.1.total_cmp(&a.1));

    let n = rings.len();
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut depth = vec![0usize; n];
    for i in 0..n {
        if let Some(j) = (0..i).rev().find(|&j| ring_inside(&rings[i].0, &rings[j].0, tol)) {
            parent[i] = Some(j);
            depth[i] = depth[j] + 1;
        }
    }

    let mut shells: Vec<(usize, Vec<Vec<Coord>>)> = Vec::new();
    for (i, (ring, _)) in rings.into_iter().enumerate() {
        if depth[i] % 2 == 0 {
            shells.push((i, vec![oriented(ring, true)]));
        } else if let Some(p) = parent[i] {
            if let Some((_, polygon)) = shells.iter_mut().find(|(k, _)| *k == p) {
                polygon.push(oriented(ring, false));
            }
        }
    }
    let mut polygons: Vec<Steric> = shells
        .into_iter()
        .map(|(_, rings)| Steric::Polygon(rings))
        .collect();
    match polygons.len() {
        0 => Steric::empty(),
        1 => polygons.remove(0),
        _ => Steric::Collection(polygons),
    }
}
