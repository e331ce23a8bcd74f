//! # `vtxcolor` - parallel distance-one graph vertex coloring
//!
//! A shared-memory, speculative distance-one coloring algorithm plus a
//! follow-on equitable recoloring pass that rebalances color-class sizes.
//! Given an undirected graph, [`color_distance_one`] assigns a non-negative
//! integer color to every vertex such that no two adjacent vertices share a
//! color, using as few colors as the greedy speculate-then-repair heuristic
//! finds; [`equitable_recolor`] then optionally redistributes vertices
//! across colors so class sizes approach the mean.
//!
//! Graph ingestion, community-detection clients, statistics printing beyond
//! the structured log lines emitted here, and command-line handling are all
//! external collaborators and out of scope for this crate.

mod colorclass;
mod colorer;
mod config;
mod error;
mod graph;
mod orchestrate;
mod priority;
mod queue;
mod rebalance;
mod resolver;
mod stats;
mod verify;

mod api;

pub use colorclass::{build as build_color_class_index, ColorClassIndex};
pub use config::{Config, MaxColorPolicy, RebalanceMode};
pub use error::ColorError;
pub use graph::{Edge, Graph, Vertex};
pub use stats::VarianceReport;
pub use verify::count_conflicts;

pub use api::{
    build_color_size, color_distance_one, compute_variance, equitable_recolor, ColoringResult,
    RebalanceResult,
};
