//! `build_color_size` and `compute_variance`: the two pure, read-only
//! reductions from the external interface (6).

use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use std::sync::atomic::{AtomicU32, Ordering};

/// Counts per-class sizes. `colors` must be a complete coloring (no `-1`
/// entries).
pub fn build_color_size(colors: &[i32], num_colors: u32) -> Vec<u32> {
    let counts: Vec<AtomicU32> = (0..num_colors).map(|_| AtomicU32::new(0)).collect();
    colors.par_iter().for_each(|&c| {
        debug_assert!(c >= 0, "build_color_size requires a complete coloring");
        counts[c as usize].fetch_add(1, Ordering::Relaxed);
    });
    counts.into_iter().map(AtomicU32::into_inner).collect()
}

/// Summary of a color-size distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VarianceReport {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub variance: f64,
}

/// Pure reduction over `color_size`; no parallelism needed since
/// `num_colors` is always far smaller than `nvertices`.
pub fn compute_variance(num_colors: u32, color_size: &[u32]) -> VarianceReport {
    assert_eq!(color_size.len(), num_colors as usize);
    if color_size.is_empty() {
        return VarianceReport {
            min: 0,
            max: 0,
            mean: 0.0,
            variance: 0.0,
        };
    }

    let min = *color_size.iter().min().unwrap();
    let max = *color_size.iter().max().unwrap();
    let mean = color_size.iter().map(|&s| s as f64).sum::<f64>() / color_size.len() as f64;
    let variance = color_size
        .iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / color_size.len() as f64;

    VarianceReport {
        min,
        max,
        mean,
        variance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_class() {
        let colors = vec![0, 1, 0, 2, 1, 0];
        assert_eq!(build_color_size(&colors, 3), vec![3, 2, 1]);
    }

    #[test]
    fn variance_of_balanced_classes_is_zero() {
        let report = compute_variance(3, &[4, 4, 4]);
        assert_eq!(report.min, 4);
        assert_eq!(report.max, 4);
        assert_eq!(report.mean, 4.0);
        assert_eq!(report.variance, 0.0);
    }

    #[test]
    fn variance_reflects_imbalance() {
        let report = compute_variance(3, &[8, 2, 2]);
        assert_eq!(report.min, 2);
        assert_eq!(report.max, 8);
        assert!((report.mean - 4.0).abs() < 1e-9);
        assert!(report.variance > 0.0);
    }
}
