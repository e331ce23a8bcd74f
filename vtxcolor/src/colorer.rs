//! 4.1 Speculative Colorer.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::Mutex;

use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;

use crate::error::ColorError;
use crate::graph::Graph;

/// Per-worker scratch reused across vertices within the same pass (9,
/// "thread-local scratch"): a boolean mark plus the list of indices it set,
/// so clearing between vertices only touches what was actually set.
#[derive(Default)]
struct Mark {
    bits: Vec<bool>,
    touched: Vec<usize>,
}

impl Mark {
    fn ensure_capacity(&mut self, cap: usize) {
        if self.bits.len() < cap {
            self.bits.resize(cap, false);
        }
    }

    fn set(&mut self, c: usize) {
        if !self.bits[c] {
            self.bits[c] = true;
            self.touched.push(c);
        }
    }

    fn clear(&mut self) {
        for c in self.touched.drain(..) {
            self.bits[c] = false;
        }
    }
}

/// Runs one speculative-coloring pass (4.1) over every vertex in `queue`.
///
/// `cap` is the current shared `MaxColor` upper bound. Under
/// `MaxColorPolicy::AutoFromDegree` it is sized once before the first round
/// and never needs to grow. Under a `Fixed` policy a neighbor color may
/// exceed it; non-strict mode grows the cap (and this worker's local mark)
/// on demand, `strict` mode fails the whole pass instead of truncating
/// silently, per 4.1's "must not be silently dropped."
pub(crate) fn speculative_color(
    graph: &Graph,
    colors: &[AtomicI32],
    queue: &[AtomicU32],
    cap: &AtomicU32,
    strict: bool,
) -> Result<(), ColorError> {
    let has_failed = AtomicBool::new(false);
    let failure: Mutex<Option<ColorError>> = Mutex::new(None);

    queue.par_iter().for_each_init(Mark::default, |mark, slot| {
        if has_failed.load(Ordering::Relaxed) {
            return;
        }

        let v = slot.load(Ordering::Relaxed);
        mark.ensure_capacity(cap.load(Ordering::Relaxed) as usize);

        let mut max_seen: i64 = -1;
        for &w in graph.neighbors(v) {
            if w == v {
                continue;
            }
            let c = colors[w as usize].load(Ordering::Relaxed);
            if c < 0 {
                continue;
            }
            let c = c as usize;
            if c >= mark.bits.len() {
                if strict {
                    let mut slot = failure.lock().unwrap();
                    if slot.is_none() {
                        *slot = Some(ColorError::CapacityExhausted {
                            vertex: v,
                            color: c as u32,
                            max_color: cap.load(Ordering::Relaxed),
                        });
                    }
                    has_failed.store(true, Ordering::Relaxed);
                    return;
                }
                mark.ensure_capacity(c + 1);
                cap.fetch_max(c as u32 + 1, Ordering::Relaxed);
            }
            mark.set(c);
            max_seen = max_seen.max(c as i64);
        }

        let mut my_color: usize = 0;
        while (my_color as i64) <= max_seen && mark.bits[my_color] {
            my_color += 1;
        }

        colors[v as usize].store(my_color as i32, Ordering::Relaxed);
        mark.clear();
    });

    match failure.into_inner().unwrap() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use std::sync::atomic::AtomicI32;

    fn colors_of(n: usize) -> Vec<AtomicI32> {
        (0..n).map(|_| AtomicI32::new(-1)).collect()
    }

    fn queue_of(n: usize) -> Vec<AtomicU32> {
        (0..n as u32).map(AtomicU32::new).collect()
    }

    #[test]
    fn colors_triangle_with_no_neighbor_colored_yet() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let colors = colors_of(3);
        let queue = queue_of(0); // empty: nothing queued, so vertex 0 alone below
        let _ = queue;
        let cap = AtomicU32::new(graph.max_degree() as u32 + 1);
        // color vertex 0 only
        let single = vec![AtomicU32::new(0)];
        speculative_color(&graph, &colors, &single, &cap, false).unwrap();
        assert_eq!(colors[0].load(Ordering::Relaxed), 0);
    }

    #[test]
    fn skips_self_loop_in_mark_step() {
        let graph = Graph::from_edges(1, &[(0, 0)]);
        let colors = colors_of(1);
        let cap = AtomicU32::new(2);
        let queue = queue_of(1);
        speculative_color(&graph, &colors, &queue, &cap, false).unwrap();
        assert_eq!(colors[0].load(Ordering::Relaxed), 0);
    }

    #[test]
    fn grows_cap_on_demand_when_not_strict() {
        let graph = Graph::from_edges(2, &[(0, 1)]);
        let colors = colors_of(2);
        colors[1].store(5, Ordering::Relaxed);
        let cap = AtomicU32::new(1); // too small for color 5
        let queue = vec![AtomicU32::new(0)];
        speculative_color(&graph, &colors, &queue, &cap, false).unwrap();
        assert_eq!(colors[0].load(Ordering::Relaxed), 0);
        assert!(cap.load(Ordering::Relaxed) >= 6);
    }

    #[test]
    fn strict_mode_reports_capacity_exhaustion() {
        let graph = Graph::from_edges(2, &[(0, 1)]);
        let colors = colors_of(2);
        colors[1].store(5, Ordering::Relaxed);
        let cap = AtomicU32::new(1);
        let queue = vec![AtomicU32::new(0)];
        let err = speculative_color(&graph, &colors, &queue, &cap, true).unwrap_err();
        assert!(matches!(err, ColorError::CapacityExhausted { .. }));
    }
}
