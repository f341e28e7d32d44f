//! Sliding-window vertex reuse cache.
//!
//! Cells are visited X-fastest, then Z, then Y, so every cell a vertex can be
//! reused from lies at most one plane + one row + one cell behind the current
//! traversal index:
//!
//! ```text
//! traversal index = x + z * C + y * C²
//!
//! (x-1, y-1, z-1) is C² + C + 1 cells back  →  default window
//! ```
//!
//! Entries live in a ring of `window` slots indexed by `traversal % window`.
//! Each entry remembers the traversal index that wrote it, so a slot that has
//! been overwritten (or was never written) reads back as a miss.

use crate::constants::REUSE_SLOTS;

/// Owned vertex slots of one cell (corner 7 + three edges).
pub type ReuseSlots = [Option<u32>; REUSE_SLOTS];

#[derive(Clone, Copy, Debug, Default)]
struct CacheEntry {
  key: Option<usize>,
  slots: ReuseSlots,
}

/// Bounded map from (cell, slot) to a global vertex index.
#[derive(Clone, Debug)]
pub struct VertexReuseCache {
  cells_per_axis: usize,
  entries: Vec<CacheEntry>,
}

impl VertexReuseCache {
  /// Cache with the smallest window that never evicts a reachable cell.
  pub fn new(cells_per_axis: usize) -> Self {
    Self::with_window(cells_per_axis, Self::default_window(cells_per_axis))
  }

  /// Cache with an explicit window. A window of 0 disables reuse.
  pub fn with_window(cells_per_axis: usize, window: usize) -> Self {
    Self {
      cells_per_axis,
      entries: vec![CacheEntry::default(); window],
    }
  }

  /// Distance from a cell to its farthest reusable neighbor.
  #[inline]
  pub const fn default_window(cells_per_axis: usize) -> usize {
    cells_per_axis * cells_per_axis + cells_per_axis + 1
  }

  /// Number of ring slots.
  #[inline]
  pub fn window(&self) -> usize {
    self.entries.len()
  }

  /// Position of a cell in traversal order.
  #[inline(always)]
  pub fn traversal_index(&self, cell: [usize; 3]) -> usize {
    let [x, y, z] = cell;
    x + self.cells_per_axis * (z + self.cells_per_axis * y)
  }

  /// Preceding neighbor reached by subtracting one along each direction bit.
  ///
  /// Returns `None` when the neighbor would lie outside the chunk.
  #[inline]
  pub fn neighbor(cell: [usize; 3], direction: u8) -> Option<[usize; 3]> {
    let [x, y, z] = cell;
    Some([
      x.checked_sub((direction & 1) as usize)?,
      y.checked_sub(((direction >> 1) & 1) as usize)?,
      z.checked_sub(((direction >> 2) & 1) as usize)?,
    ])
  }

  /// Global vertex index registered by `cell` in `slot`, if still cached.
  #[inline]
  pub fn get(&self, cell: [usize; 3], slot: u8) -> Option<u32> {
    if self.entries.is_empty() {
      return None;
    }
    let key = self.traversal_index(cell);
    let entry = &self.entries[key % self.entries.len()];
    if entry.key == Some(key) {
      entry.slots.get(slot as usize).copied().flatten()
    } else {
      None
    }
  }

  /// Publish the owned vertices of `cell`.
  ///
  /// Must be called after the cell's own lookups: its farthest neighbor
  /// shares the same ring slot.
  #[inline]
  pub fn commit(&mut self, cell: [usize; 3], slots: ReuseSlots) {
    if self.entries.is_empty() {
      return;
    }
    let key = self.traversal_index(cell);
    let len = self.entries.len();
    self.entries[key % len] = CacheEntry {
      key: Some(key),
      slots,
    };
  }

  /// Forget every entry, keeping the allocation.
  pub fn clear(&mut self) {
    self.entries.fill(CacheEntry::default());
  }
}

#[cfg(test)]
#[path = "reuse_cache_test.rs"]
mod reuse_cache_test;
