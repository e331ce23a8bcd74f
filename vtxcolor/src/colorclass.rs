//! 4.4 Color-Class Index Build: groups vertices by color into a CSR layout.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;

/// `colorPtr[c+1] - colorPtr[c]` is the size of class `c`; `colorIndex`
/// within that range lists exactly those vertices. Immutable once built;
/// the rebalancer reads it but never rewrites it.
pub struct ColorClassIndex {
    pub color_ptr: Vec<usize>,
    pub color_index: Vec<u32>,
}

/// Builds the CSR color-class index via count -> prefix-sum -> scatter, as
/// specified in 4.4. Counting is parallel (atomic fetch-add per vertex, as
/// specified); the scatter itself is a single sequential pass over `colors`
/// since, unlike the coloring rounds, it is linear in `nvertices` once and
/// is not where this crate's parallelism budget belongs.
pub fn build(colors: &[i32], num_colors: u32) -> ColorClassIndex {
    let num_colors = num_colors as usize;
    let counts: Vec<AtomicUsize> = (0..=num_colors).map(|_| AtomicUsize::new(0)).collect();

    colors.par_iter().for_each(|&c| {
        debug_assert!(c >= 0, "color-class index requires a complete coloring");
        counts[c as usize + 1].fetch_add(1, Ordering::Relaxed);
    });

    let mut color_ptr: Vec<usize> = counts.into_iter().map(AtomicUsize::into_inner).collect();
    for i in 1..color_ptr.len() {
        color_ptr[i] += color_ptr[i - 1];
    }

    let total = *color_ptr.last().unwrap();
    let mut color_index = vec![0u32; total];
    let mut cursor = color_ptr[..num_colors].to_vec();
    for (v, &c) in colors.iter().enumerate() {
        let c = c as usize;
        color_index[cursor[c]] = v as u32;
        cursor[c] += 1;
    }

    ColorClassIndex {
        color_ptr,
        color_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csr_is_well_formed_permutation() {
        let colors = vec![0, 1, 0, 2, 1, 0];
        let idx = build(&colors, 3);
        assert_eq!(idx.color_ptr, vec![0, 3, 5, 6]);
        let mut sorted = idx.color_index.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);

        for c in 0..3 {
            let lo = idx.color_ptr[c];
            let hi = idx.color_ptr[c + 1];
            for &v in &idx.color_index[lo..hi] {
                assert_eq!(colors[v as usize], c as i32);
            }
        }
    }

    #[test]
    fn empty_coloring_yields_empty_classes() {
        let colors: Vec<i32> = vec![0, 0, 0, 0];
        let idx = build(&colors, 1);
        assert_eq!(idx.color_ptr, vec![0, 4]);
        assert_eq!(idx.color_index.len(), 4);
    }
}
