//! One-shot generation of the per-vertex symmetry-breaking priority array.

use rand::Rng;
use rand_pcg::Lcg64Xsh32;

const SEED_STREAM: u64 = 0xcafef00dd15ea5e5;

/// Draws `nvertices` priority values once, before the coloring loop starts.
/// Immutable afterward; consulted only by the conflict resolver (4.2).
pub(crate) fn generate(nvertices: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg64Xsh32::new(SEED_STREAM, seed);
    (0..nvertices).map(|_| rng.gen::<f64>()).collect()
}

/// The antisymmetric rule from 4.2 / the symmetry-breaking design note:
/// `v` is the loser of conflict `{v, w}` iff `(rand[v], v) < (rand[w], w)`
/// lexicographically.
#[inline]
pub(crate) fn is_loser(priority: &[f64], v: u32, w: u32) -> bool {
    let (pv, pw) = (priority[v as usize], priority[w as usize]);
    (pv, v) < (pw, w)
}
