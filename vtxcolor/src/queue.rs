//! The two swap-buffer work queues (`Q`, `Qtmp`) of 3.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Two fixed-capacity (`nvertices`) vertex-id buffers that ping-pong between
/// "read this round" and "write conflicts for next round" roles.
///
/// Allocated once per coloring call and reused across every round, matching
/// the resource-lifetime note in 5: queues are scoped to a single call.
pub(crate) struct SwapQueue {
    buffers: [Vec<AtomicU32>; 2],
    tails: [AtomicUsize; 2],
    read_side: usize,
}

impl SwapQueue {
    /// Initializes `Q` to the identity permutation `[0, nvertices)` with
    /// `QTail = nvertices`, and `Qtmp` empty.
    pub(crate) fn new(nvertices: usize) -> Self {
        let identity = (0..nvertices).map(|i| AtomicU32::new(i as u32)).collect();
        let empty = (0..nvertices).map(|_| AtomicU32::new(0)).collect();
        Self {
            buffers: [identity, empty],
            tails: [AtomicUsize::new(nvertices), AtomicUsize::new(0)],
            read_side: 0,
        }
    }

    pub(crate) fn read_len(&self) -> usize {
        self.tails[self.read_side].load(Ordering::Relaxed)
    }

    pub(crate) fn read_slice(&self) -> &[AtomicU32] {
        &self.buffers[self.read_side][..self.read_len()]
    }

    /// The write-side buffer plus its atomic tail, for the conflict resolver
    /// to reserve slots in via `fetch_add`.
    pub(crate) fn write_side(&self) -> (&[AtomicU32], &AtomicUsize) {
        let write_side = 1 - self.read_side;
        (&self.buffers[write_side], &self.tails[write_side])
    }

    /// `Swap`: the write side becomes the new read side; the old read side
    /// is reset to an empty write side for the next round.
    pub(crate) fn swap(&mut self) {
        let old_read = self.read_side;
        self.read_side = 1 - self.read_side;
        self.tails[old_read].store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_identity_permutation() {
        let q = SwapQueue::new(5);
        assert_eq!(q.read_len(), 5);
        let vals: Vec<u32> = q.read_slice().iter().map(|a| a.load(Ordering::Relaxed)).collect();
        assert_eq!(vals, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn swap_promotes_write_side_and_resets_old_read_side() {
        let mut q = SwapQueue::new(4);
        {
            let (buf, tail) = q.write_side();
            let k = tail.fetch_add(1, Ordering::Relaxed);
            buf[k].store(2, Ordering::Relaxed);
        }
        q.swap();
        assert_eq!(q.read_len(), 1);
        assert_eq!(q.read_slice()[0].load(Ordering::Relaxed), 2);
        let (_, tail) = q.write_side();
        assert_eq!(tail.load(Ordering::Relaxed), 0);
    }
}
