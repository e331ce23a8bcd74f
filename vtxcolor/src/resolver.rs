//! 4.2 Conflict Resolver.

use std::sync::atomic::{AtomicI32, AtomicU32, AtomicUsize, Ordering};

use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;

use crate::graph::Graph;
use crate::priority;

/// Runs one conflict-detection pass (4.2) over every vertex in `queue`.
///
/// For every `v` with a same-colored neighbor `w`, the antisymmetric
/// `(rand[v], v) < (rand[w], w)` rule (4.2, 9) designates exactly one of
/// `{v, w}` as the loser; the loser's color is reset to `-1` and it is
/// appended to `write_buf` at a slot reserved via `fetch_add` on
/// `write_tail`. Returns the number of vertices re-queued.
pub(crate) fn detect_conflicts(
    graph: &Graph,
    colors: &[AtomicI32],
    priorities: &[f64],
    queue: &[AtomicU32],
    write_buf: &[AtomicU32],
    write_tail: &AtomicUsize,
) -> usize {
    queue.par_iter().for_each(|slot| {
        let v = slot.load(Ordering::Relaxed);
        let my_color = colors[v as usize].load(Ordering::Relaxed);
        if my_color < 0 {
            // Already reset by a concurrent resolution of the other
            // endpoint this same pass.
            return;
        }

        for &w in graph.neighbors(v) {
            if w == v {
                continue;
            }
            let their_color = colors[w as usize].load(Ordering::Relaxed);
            if their_color != my_color {
                continue;
            }
            if priority::is_loser(priorities, v, w) {
                let k = write_tail.fetch_add(1, Ordering::Relaxed);
                write_buf[k].store(v, Ordering::Relaxed);
                colors[v as usize].store(-1, Ordering::Relaxed);
                return;
            }
        }
    });

    write_tail.load(Ordering::Relaxed)
}
