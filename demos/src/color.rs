//! Demo binary: samples a small random graph, colors it, and optionally
//! rebalances the resulting color classes. Graph ingestion from real-world
//! formats and full-scale sampling are out of scope for the `vtxcolor`
//! library itself; this binary exists only to exercise the library the way
//! `glauber`'s own `examples/color.rs` exercised its coloring routine.

use std::num::NonZeroUsize;

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use serde_json::json;
use structopt::StructOpt;

use vtxcolor::{color_distance_one, equitable_recolor, build_color_size, compute_variance};
use vtxcolor::{Config, Graph, RebalanceMode};

#[derive(Debug, StructOpt)]
#[structopt(name = "color", about = "Color a randomly sampled graph.")]
struct Opt {
    /// Number of vertices.
    #[structopt(long, default_value = "1000")]
    nvertices: u32,

    /// Approximate average degree.
    #[structopt(long, default_value = "6")]
    degree: u32,

    /// Number of worker threads.
    #[structopt(long, default_value = "4")]
    nthreads: usize,

    /// Also run the equitable rebalancing pass.
    #[structopt(long)]
    rebalance: bool,

    /// Rebalance mode, one of "first-fit" or "least-used".
    #[structopt(long, default_value = "first-fit")]
    rebalance_mode: String,

    /// Random seed for graph sampling.
    #[structopt(long, default_value = "0")]
    seed: u64,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let graph = sample_graph(opt.nvertices, opt.degree, opt.seed);

    let n_threads = NonZeroUsize::new(opt.nthreads.max(1)).unwrap();
    let mode = match opt.rebalance_mode.as_str() {
        "least-used" => RebalanceMode::LeastUsed,
        _ => RebalanceMode::FirstFit,
    };
    let config = Config::new(n_threads).with_rebalance_mode(mode);

    let mut result = color_distance_one(&graph, &config).expect("color_distance_one");
    println!(
        "{}",
        json!({
            "nvertices": graph.nvertices(),
            "nedges": graph.nedges(),
            "num_colors": result.num_colors,
            "conflicts": result.conflicts,
            "elapsed_ms": result.total_time.as_secs_f64() * 1e3,
        })
    );

    if opt.rebalance {
        let mut color_size = build_color_size(graph.nvertices(), &result.colors, result.num_colors);
        let before = compute_variance(graph.nvertices(), result.num_colors, &color_size);

        let rr = equitable_recolor(
            &graph,
            &mut result.colors,
            result.num_colors,
            &mut color_size,
            &config,
        )
        .expect("equitable_recolor");

        let after = compute_variance(graph.nvertices(), result.num_colors, &color_size);
        println!(
            "{}",
            json!({
                "moved": rr.moved,
                "max_before": before.max,
                "max_after": after.max,
                "variance_before": before.variance,
                "variance_after": after.variance,
                "elapsed_ms": rr.total_time.as_secs_f64() * 1e3,
            })
        );
    }
}

/// Samples a small connected graph with the given approximate average
/// degree: a ring to guarantee connectivity, plus random chords.
fn sample_graph(nvertices: u32, degree: u32, seed: u64) -> Graph {
    let n = nvertices as usize;
    let mut edges: Vec<(u32, u32)> = (0..nvertices).map(|v| (v, (v + 1) % nvertices)).collect();

    let mut rng = Lcg64Xsh32::new(0xcafef00dd15ea5e5, seed);
    let extra = n * degree as usize / 2;
    for _ in 0..extra {
        let u = rng.gen_range(0..nvertices);
        let v = rng.gen_range(0..nvertices);
        if u != v {
            edges.push((u, v));
        }
    }

    Graph::from_edges(n, &edges)
}
