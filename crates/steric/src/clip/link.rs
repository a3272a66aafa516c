//! Relinking of fragments into rings and lines by endpoint matching.

use crate::calc::coord_eq;
use crate::error::{Error, Result};
use crate::geom::{Coord, GeomCfg};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkMode {
    /// Every chain must close; unclosable chains draw from the fallback pool.
    Rings,
    /// Chains grow at both ends and are emitted when nothing attaches.
    Lines,
}

fn closed(chain: &[Coord], tol: f64) -> bool {
    chain.len() >= 3 && coord_eq(chain[0], chain[chain.len() - 1], tol)
}

/// Take the first piece with an end at `at`, oriented to start there.
fn take_matching(pool: &mut [Option<Vec<Coord>>], at: Coord, tol: f64) -> Option<Vec<Coord>> {
    for slot in pool.iter_mut() {
        let Some(piece) = slot.as_ref() else {
            continue;
        };
        if coord_eq(piece[0], at, tol) {
            return slot.take();
        }
        if coord_eq(piece[piece.len() - 1], at, tol) {
            return slot.take().map(|mut p| {
                p.reverse();
                p
            });
        }
    }
    None
}

fn append(chain: &mut Vec<Coord>, piece: Vec<Coord>) {
    chain.extend(piece.into_iter().skip(1));
}

/// Chain `pieces` greedily at matching endpoints (within `cfg.eps_link`).
///
/// In [`LinkMode::Rings`] a chain that cannot close from `pieces` draws from
/// `fallback`; each such draw counts as one attempt, and exceeding
/// `cfg.max_link_attempts` or finding no candidate is a [`Error::WrongLink`].
pub fn link(
    pieces: Vec<Vec<Coord>>,
    fallback: Vec<Vec<Coord>>,
    mode: LinkMode,
    cfg: GeomCfg,
) -> Result<Vec<Vec<Coord>>> {
    let tol = cfg.eps_link;
    let mut pool: Vec<Option<Vec<Coord>>> = pieces
        .into_iter()
        .filter(|p| p.len() >= 2)
        .map(Some)
        .collect();
    let mut spare: Vec<Option<Vec<Coord>>> = fallback.into_iter().map(Some).collect();
    let mut out = Vec::new();
    let mut attempts = 0;

    while let Some(mut chain) = pool.iter_mut().find_map(Option::take) {
        let mut flipped = false;
        loop {
            if closed(&chain, tol) {
                let first = chain[0];
                if let Some(last) = chain.last_mut() {
                    *last = first;
                }
                break;
            }
            let Some(&tail) = chain.last() else {
                break;
            };
            if let Some(next) = take_matching(&mut pool, tail, tol) {
                append(&mut chain, next);
                continue;
            }
            match mode {
                LinkMode::Rings => {
                    attempts += 1;
                    let next = (attempts <= cfg.max_link_attempts)
                        .then(|| take_matching(&mut spare, tail, tol))
                        .flatten();
                    match next {
                        Some(next) => append(&mut chain, next),
                        None => {
                            tracing::debug!(attempts, open_at = ?tail, "relinking failed");
                            return Err(Error::WrongLink { attempts });
                        }
                    }
                }
                LinkMode::Lines => {
                    if flipped {
                        break;
                    }
                    chain.reverse();
                    flipped = true;
                }
            }
        }
        if flipped {
            chain.reverse();
        }
        out.push(chain);
    }
    tracing::trace!(chains = out.len(), ?mode, "relinked");
    Ok(out)
}
