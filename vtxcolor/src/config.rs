//! Run configuration: thread count, rebalance policy, and the `MaxColor`
//! sizing strategy. Deliberately a plain struct with no env/file loading --
//! that belongs to the excluded command-line layer.

use std::num::NonZeroUsize;

/// Policy for choosing a replacement color when rebalancing an oversized
/// color class; see component 4.5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebalanceMode {
    /// Smallest permissible color.
    FirstFit,
    /// Permissible color with the smallest current class size, ties broken
    /// by smaller color id.
    LeastUsed,
}

/// How the speculative colorer sizes its per-worker mark buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxColorPolicy {
    /// Size the mark to `graph.max_degree() + 1` before the first round;
    /// this is a safe upper bound for first-fit distance-one coloring and
    /// never needs to grow afterward.
    AutoFromDegree,
    /// Start the mark at a fixed capacity; grow it on demand if a neighbor
    /// color exceeds the cap (never silently truncated), unless `strict` is
    /// set, in which case exceeding the cap is a [`crate::ColorError`].
    Fixed { initial: u32, strict: bool },
}

/// Bundled configuration for a single coloring or rebalancing call.
#[derive(Clone, Debug)]
pub struct Config {
    pub n_threads: NonZeroUsize,
    pub rebalance_mode: RebalanceMode,
    pub max_color: MaxColorPolicy,
}

impl Config {
    /// A reasonable default: one worker per available core, `FirstFit`
    /// rebalancing, and mark sizing auto-derived from the graph's max
    /// degree.
    pub fn new(n_threads: NonZeroUsize) -> Self {
        Self {
            n_threads,
            rebalance_mode: RebalanceMode::FirstFit,
            max_color: MaxColorPolicy::AutoFromDegree,
        }
    }

    pub fn with_rebalance_mode(mut self, mode: RebalanceMode) -> Self {
        self.rebalance_mode = mode;
        self
    }

    pub fn with_max_color(mut self, policy: MaxColorPolicy) -> Self {
        self.max_color = policy;
        self
    }
}
