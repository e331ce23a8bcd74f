//! 4.6 Verifier.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

use crate::graph::Graph;

/// Counts edges `{v, w}` with `v != w` and `colors[v] == colors[w]`. Each
/// such edge is seen from both endpoints' neighbor lists, so the raw scan
/// total is halved before returning, per 4.6.
pub fn count_conflicts(graph: &Graph, colors: &[i32]) -> u64 {
    let total: u64 = (0..graph.nvertices() as u32)
        .into_par_iter()
        .map(|v| {
            graph
                .neighbors(v)
                .iter()
                .filter(|&&w| w != v && colors[v as usize] == colors[w as usize])
                .count() as u64
        })
        .sum();
    total / 2
}

/// Atomic-counter variant usable from within an already-parallel context
/// (e.g. after a rebalance pass) without re-entering `rayon`'s splitter.
pub(crate) fn count_conflicts_atomic(graph: &Graph, colors: &[i32], into: &AtomicU64) {
    (0..graph.nvertices() as u32).into_par_iter().for_each(|v| {
        let hits = graph
            .neighbors(v)
            .iter()
            .filter(|&&w| w != v && colors[v as usize] == colors[w as usize])
            .count();
        if hits > 0 {
            into.fetch_add(hits as u64, Ordering::Relaxed);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proper_coloring_has_zero_conflicts() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let colors = vec![0, 1, 2];
        assert_eq!(count_conflicts(&graph, &colors), 0);
    }

    #[test]
    fn monochromatic_edge_is_counted_once() {
        let graph = Graph::from_edges(2, &[(0, 1)]);
        let colors = vec![3, 3];
        assert_eq!(count_conflicts(&graph, &colors), 1);
    }

    #[test]
    fn verification_is_idempotent() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let colors = vec![0, 0, 1, 1];
        let first = count_conflicts(&graph, &colors);
        let second = count_conflicts(&graph, &colors);
        assert_eq!(first, second);
    }

    #[test]
    fn self_loops_never_count_as_conflicts() {
        let graph = Graph::from_edges(1, &[(0, 0)]);
        let colors = vec![0];
        assert_eq!(count_conflicts(&graph, &colors), 0);
    }
}
