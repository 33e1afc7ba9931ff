// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded, ascending-by-distance result buffer for K-nearest-neighbour searches.

use alloc::vec::Vec;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Slot {
    dist2: f32,
    item: usize,
}

impl Slot {
    const EMPTY: Self = Self {
        dist2: f32::INFINITY,
        item: usize::MAX,
    };
}

/// Fixed-capacity buffer holding the `k` best `(squared distance, item)` pairs seen so far.
///
/// Occupied entries are always sorted ascending by squared distance.
/// While fewer than `k` entries are held, every offer is accepted and
/// [`max_dist2`](Self::max_dist2) is `+inf`; once full, only strictly closer
/// offers are accepted and each one evicts the current worst entry.
///
/// Items are opaque slot numbers chosen by whoever fills the buffer; a
/// [`GridIndex`](crate::GridIndex) stores positions into its point storage.
///
/// The buffer is scratch space owned by the caller. Reuse one per thread across
/// queries to avoid per-query allocation: [`reset`](Self::reset) grows the storage
/// to a larger `k` when needed and never shrinks it.
#[derive(Clone, Debug)]
pub struct KnnBuffer {
    slots: Vec<Slot>,
    capacity: usize,
    found: usize,
    max_dist2: f32,
}

impl Default for KnnBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl KnnBuffer {
    /// Create an empty buffer with capacity zero.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            capacity: 0,
            found: 0,
            max_dist2: f32::INFINITY,
        }
    }

    /// Create an empty buffer ready to hold `k` entries.
    pub fn with_capacity(k: usize) -> Self {
        let mut buf = Self::new();
        buf.reset(k);
        buf
    }

    /// Drop all entries and set the capacity to `k`.
    ///
    /// Storage grows when `k` exceeds any capacity used before; it never shrinks.
    pub fn reset(&mut self, k: usize) {
        if self.slots.len() < k {
            self.slots.resize(k, Slot::EMPTY);
        }
        self.capacity = k;
        self.found = 0;
        self.max_dist2 = f32::INFINITY;
    }

    /// Current capacity `k`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.found
    }

    /// True if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }

    /// True once `k` entries are held.
    pub fn is_full(&self) -> bool {
        self.found == self.capacity
    }

    /// Squared distance of the worst kept entry once full, `+inf` before that.
    pub fn max_dist2(&self) -> f32 {
        self.max_dist2
    }

    /// Offer a candidate. Returns whether it was kept.
    #[inline]
    pub fn offer(&mut self, dist2: f32, item: usize) -> bool {
        let slot = Slot { dist2, item };
        if self.found < self.capacity {
            self.place(self.found, slot);
            self.found += 1;
            if self.found == self.capacity {
                self.max_dist2 = self.slots[self.found - 1].dist2;
            }
            true
        } else if self.capacity > 0 && dist2 < self.max_dist2 {
            // Overwrite the worst entry and bubble the newcomer into place.
            self.place(self.found - 1, slot);
            self.max_dist2 = self.slots[self.found - 1].dist2;
            true
        } else {
            false
        }
    }

    /// Held entries as `(dist2, item)`, nearest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (f32, usize)> + '_ {
        self.slots[..self.found].iter().map(|s| (s.dist2, s.item))
    }

    fn place(&mut self, mut pos: usize, slot: Slot) {
        while pos > 0 && self.slots[pos - 1].dist2 > slot.dist2 {
            self.slots[pos] = self.slots[pos - 1];
            pos -= 1;
        }
        self.slots[pos] = slot;
    }
}
