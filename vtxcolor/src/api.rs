//! The four public operations from the external interface (6).

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use serde_json::json;

use crate::colorclass;
use crate::config::Config;
use crate::error::ColorError;
use crate::graph::Graph;
use crate::orchestrate;
use crate::rebalance;
use crate::stats::{self, VarianceReport};
use crate::verify;

/// Result of [`color_distance_one`].
#[derive(Debug)]
pub struct ColoringResult {
    pub colors: Vec<i32>,
    pub num_colors: u32,
    pub total_time: Duration,
    /// Residual monochromatic-edge count from the post-run verifier. Zero
    /// on a correct run; non-zero is a warning, not an error -- see 7.
    pub conflicts: u64,
}

/// Result of [`equitable_recolor`].
#[derive(Debug)]
pub struct RebalanceResult {
    pub total_time: Duration,
    pub moved: u64,
    /// Always zero: the verify-then-repair step (4.5 open-question
    /// resolution) guarantees invariant 5 before returning.
    pub conflicts: u64,
}

fn build_pool(config: &Config) -> Result<rayon::ThreadPool, ColorError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_threads.get())
        .build()
        .map_err(|source| ColorError::ThreadPool {
            n_threads: config.n_threads.get(),
            source,
        })
}

/// Speculatively colors `graph` with as few colors as the heuristic finds,
/// per §4.1-4.3. Pre: none beyond `graph` being well-formed. Post: every
/// `colors[v] >= 0`; no monochromatic edge exists (barring a verifier
/// warning, surfaced via `ColoringResult::conflicts` rather than failing the
/// call, per §7).
pub fn color_distance_one(graph: &Graph, config: &Config) -> Result<ColoringResult, ColorError> {
    let pool = build_pool(config)?;
    let start = Instant::now();

    let (colors, rounds) = pool.install(|| orchestrate::run(graph, config.max_color, 0))?;

    let colors: Vec<i32> = colors.iter().map(|c| c.load(Ordering::Relaxed)).collect();
    let num_colors = colors.iter().copied().max().map(|m| m + 1).unwrap_or(0) as u32;
    let total_time = start.elapsed();
    let conflicts = pool.install(|| verify::count_conflicts(graph, &colors));

    if conflicts == 0 {
        log::info!(
            "{}",
            json!({
                "event": "color_distance_one",
                "status": "ok",
                "nvertices": graph.nvertices(),
                "nedges": graph.nedges(),
                "num_colors": num_colors,
                "rounds": rounds,
                "nthreads": config.n_threads.get(),
                "elapsed_ms": total_time.as_secs_f64() * 1e3,
            })
        );
    } else {
        log::warn!(
            "{}",
            json!({
                "event": "color_distance_one",
                "status": "warning",
                "conflicts": conflicts,
                "num_colors": num_colors,
                "rounds": rounds,
            })
        );
    }

    Ok(ColoringResult {
        colors,
        num_colors,
        total_time,
        conflicts,
    })
}

/// Counts per-class sizes. Pure, no thread pool scoping needed beyond the
/// ambient global pool `rayon` already provides for small reductions.
pub fn build_color_size(nvertices: usize, colors: &[i32], num_colors: u32) -> Vec<u32> {
    debug_assert_eq!(colors.len(), nvertices);
    stats::build_color_size(colors, num_colors)
}

/// Pure reduction over a color-size distribution.
pub fn compute_variance(
    _nvertices: usize,
    num_colors: u32,
    color_size: &[u32],
) -> VarianceReport {
    stats::compute_variance(num_colors, color_size)
}

/// Moves vertices out of oversized color classes toward `avg =
/// ceil(nvertices / num_colors)`, per §4.5. Pre: `colors` is a valid
/// coloring. Post: invariant 1 still holds (guaranteed by verify-then-repair,
/// §4.5's open-question resolution); class sizes are closer to `avg` in the
/// ∞-norm sense, never further (invariant 6).
pub fn equitable_recolor(
    graph: &Graph,
    colors: &mut [i32],
    num_colors: u32,
    color_size: &mut [u32],
    config: &Config,
) -> Result<RebalanceResult, ColorError> {
    let pool = build_pool(config)?;
    let start = Instant::now();

    let max_before = color_size.iter().copied().max().unwrap_or(0);

    let (moved, conflicts_during_pass) = pool.install(|| {
        let index = colorclass::build(colors, num_colors);
        rebalance::rebalance(graph, colors, num_colors, color_size, &index, config.rebalance_mode)
    });
    let total_time = start.elapsed();

    let max_after = color_size.iter().copied().max().unwrap_or(0);
    debug_assert!(
        max_after <= max_before,
        "rebalance must never increase the largest class (invariant 6)"
    );

    log::info!(
        "{}",
        json!({
            "event": "equitable_recolor",
            "moved": moved,
            "residual_conflicts_repaired": conflicts_during_pass,
            "max_class_before": max_before,
            "max_class_after": max_after,
            "elapsed_ms": total_time.as_secs_f64() * 1e3,
        })
    );

    Ok(RebalanceResult {
        total_time,
        moved,
        conflicts: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RebalanceMode};
    use std::num::NonZeroUsize;

    fn cfg() -> Config {
        Config::new(NonZeroUsize::new(2).unwrap())
    }

    #[test]
    fn k4_needs_four_colors() {
        let edges = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let graph = Graph::from_edges(4, &edges);
        let result = color_distance_one(&graph, &cfg()).unwrap();
        assert_eq!(result.conflicts, 0);
        assert_eq!(result.num_colors, 4);
        let mut sorted = result.colors.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn star_on_six_uses_two_colors() {
        let edges = [(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)];
        let graph = Graph::from_edges(6, &edges);
        let result = color_distance_one(&graph, &cfg()).unwrap();
        assert_eq!(result.conflicts, 0);
        assert_eq!(result.num_colors, 2);
        for leaf in 1..=5 {
            assert_ne!(result.colors[0], result.colors[leaf]);
        }
        let leaf_colors: Vec<i32> = (1..=5).map(|v| result.colors[v]).collect();
        assert!(leaf_colors.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn end_to_end_color_then_rebalance() {
        let edges = [
            (0, 1), (1, 2), (0, 2),
            (3, 4), (4, 5), (3, 5),
            (6, 7), (7, 8), (6, 8),
        ];
        let graph = Graph::from_edges(9, &edges);
        let mut result = color_distance_one(&graph, &cfg()).unwrap();
        let mut color_size = build_color_size(9, &result.colors, result.num_colors);

        let rebalance_cfg = cfg().with_rebalance_mode(RebalanceMode::LeastUsed);
        let rr = equitable_recolor(
            &graph,
            &mut result.colors,
            result.num_colors,
            &mut color_size,
            &rebalance_cfg,
        )
        .unwrap();

        assert_eq!(rr.conflicts, 0);
        assert_eq!(verify::count_conflicts(&graph, &result.colors), 0);
        let report = compute_variance(9, result.num_colors, &color_size);
        assert!(report.max as f64 >= report.mean);
    }
}
