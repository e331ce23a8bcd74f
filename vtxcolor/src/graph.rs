//! Compact graph data structure.

use rayon::iter::IndexedParallelIterator;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;

/// Vertex ids are a contiguous `u32` range `[0, nvertices)`.
pub type Vertex = u32;

/// A single directed half-edge, as it appears at the boundary described in
/// the external interface: each entry in the flat neighbor array exposes the
/// destination vertex as its `tail`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub tail: Vertex,
}

/// A CSR (compressed-sparse-row) adjacency list intended for sparse graphs.
///
/// The space of vertices is a contiguous range of `u32` ints from `[0,
/// nvertices)`. The graph is treated as undirected: every edge `{u, v}` is
/// expected to appear in both `u`'s and `v`'s neighbor slice. Self-loops
/// (`tail == v`) may be present; every pass that walks neighbors skips them
/// uniformly.
pub struct Graph {
    offsets: Vec<usize>,
    neighbors: Vec<Vertex>,
}

impl Graph {
    /// `offsets.len()` should be one greater than the number of vertices,
    /// with `neighbors[offsets[i]..offsets[i+1]]` being the edges incident
    /// from `i`. Neighbor slices need not be sorted or deduplicated; unlike
    /// the speculative colorer, this constructor does not require it.
    pub fn new(offsets: Vec<usize>, neighbors: Vec<Vertex>) -> Self {
        assert!(!offsets.is_empty(), "offsets must contain at least one entry");
        assert_eq!(
            *offsets.last().unwrap(),
            neighbors.len(),
            "last offset must equal the neighbor array length"
        );
        debug_assert!(offsets
            .par_windows(2)
            .all(|s| s[0] <= s[1] && s[1] <= neighbors.len()));
        Self { offsets, neighbors }
    }

    /// Builds a graph from an undirected edge list over `nvertices` vertices.
    /// Each `(u, v)` pair is mirrored into both `u`'s and `v`'s adjacency
    /// list. Intended for tests and small demo graphs; production-scale
    /// ingestion from on-disk formats is out of scope for this crate.
    pub fn from_edges(nvertices: usize, edges: &[(Vertex, Vertex)]) -> Self {
        let mut degree = vec![0usize; nvertices];
        for &(u, v) in edges {
            degree[u as usize] += 1;
            if u != v {
                degree[v as usize] += 1;
            }
        }

        let mut offsets = Vec::with_capacity(nvertices + 1);
        offsets.push(0usize);
        for d in &degree {
            offsets.push(offsets.last().unwrap() + d);
        }

        let mut neighbors = vec![0 as Vertex; *offsets.last().unwrap()];
        let mut cursor = offsets.clone();
        for &(u, v) in edges {
            neighbors[cursor[u as usize]] = v;
            cursor[u as usize] += 1;
            if u != v {
                neighbors[cursor[v as usize]] = u;
                cursor[v as usize] += 1;
            }
        }

        Self::new(offsets, neighbors)
    }

    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        &self.neighbors[lo..hi]
    }

    pub fn degree(&self, v: Vertex) -> usize {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        hi - lo
    }

    pub fn max_degree(&self) -> usize {
        (0..self.nvertices())
            .map(|v| self.degree(v as Vertex))
            .max()
            .unwrap_or(0)
    }

    pub fn nvertices(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn nedges(&self) -> usize {
        self.neighbors.len() / 2
    }
}
