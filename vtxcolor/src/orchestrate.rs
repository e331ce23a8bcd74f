//! 4.3 Round Orchestration: drives the speculative colorer and conflict
//! resolver to a fixed point, separated only by the barrier implicit in
//! sequential Rust calls between two `rayon` parallel passes.

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use crate::colorer;
use crate::config::MaxColorPolicy;
use crate::error::ColorError;
use crate::graph::Graph;
use crate::priority;
use crate::queue::SwapQueue;

/// Runs `color_distance_one`'s core loop: `{Coloring, Detecting, Swap}`
/// until the read queue is empty (`Done`). Returns the final color array
/// (still signed, though every entry is guaranteed `>= 0` on success) and
/// the number of rounds it took.
pub(crate) fn run(
    graph: &Graph,
    max_color: MaxColorPolicy,
    seed: u64,
) -> Result<(Vec<AtomicI32>, u32), ColorError> {
    let n = graph.nvertices();
    let colors: Vec<AtomicI32> = (0..n).map(|_| AtomicI32::new(-1)).collect();
    let priorities = priority::generate(n, seed);
    let mut queue = SwapQueue::new(n);

    let (initial_cap, strict) = match max_color {
        MaxColorPolicy::AutoFromDegree => (graph.max_degree() as u32 + 1, false),
        MaxColorPolicy::Fixed { initial, strict } => (initial, strict),
    };
    let cap = AtomicU32::new(initial_cap.max(1));

    let mut rounds: u32 = 0;
    while queue.read_len() > 0 {
        colorer::speculative_color(graph, &colors, queue.read_slice(), &cap, strict)?;

        let (write_buf, write_tail) = queue.write_side();
        write_tail.store(0, Ordering::Relaxed);
        crate::resolver::detect_conflicts(
            graph,
            &colors,
            &priorities,
            queue.read_slice(),
            write_buf,
            write_tail,
        );

        queue.swap();
        rounds += 1;
    }

    Ok((colors, rounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    fn final_colors(graph: &Graph) -> Vec<i32> {
        let (colors, _) = run(graph, MaxColorPolicy::AutoFromDegree, 1).unwrap();
        colors.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    #[test]
    fn empty_graph_colors_everything_zero() {
        let graph = Graph::from_edges(4, &[]);
        assert_eq!(final_colors(&graph), vec![0, 0, 0, 0]);
    }

    #[test]
    fn triangle_gets_three_distinct_colors() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let colors = final_colors(&graph);
        assert!(colors.iter().all(|&c| c >= 0));
        let mut sorted = colors.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn path_of_five_is_properly_two_colored() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let colors = final_colors(&graph);
        for &(u, v) in &[(0u32, 1u32), (1, 2), (2, 3), (3, 4)] {
            assert_ne!(colors[u as usize], colors[v as usize]);
        }
    }

    #[test]
    fn no_vertex_is_left_pending() {
        let graph = Graph::from_edges(6, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
        let colors = final_colors(&graph);
        assert!(colors.iter().all(|&c| c >= 0));
    }
}
