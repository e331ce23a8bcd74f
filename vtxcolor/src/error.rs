//! Error kinds surfaced synchronously by the two fallible public operations.
//!
//! A third failure mode exists in the spec -- the verifier finding residual
//! monochromatic edges -- but per the error-handling design that is a
//! diagnostic, not an exception, so it never appears here; see
//! [`crate::ColoringResult::conflicts`] and
//! [`crate::RebalanceResult::conflicts`] instead.

use thiserror::Error;

/// Fatal errors from [`crate::color_distance_one`] or
/// [`crate::equitable_recolor`].
#[derive(Error, Debug)]
pub enum ColorError {
    /// A neighbor's color exceeded the current `MaxColor` cap and the
    /// configured policy does not permit growing it.
    #[error("color {color} at vertex {vertex} exceeds MaxColor cap {max_color}")]
    CapacityExhausted {
        vertex: u32,
        color: u32,
        max_color: u32,
    },

    /// Allocation of a queue, priority array, mark buffer, or CSR index
    /// failed.
    #[error("allocation failed while building {what}")]
    Allocation { what: &'static str },

    /// The thread pool for the requested thread count could not be built.
    #[error("failed to build a {n_threads}-thread pool: {source}")]
    ThreadPool {
        n_threads: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}
