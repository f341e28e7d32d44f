//! Per-invocation debug output.
//!
//! Visualization tools want to see which cells produced geometry. Instead of
//! a process-wide collector, the caller passes a sink into each meshing call,
//! so concurrent invocations never share mutable state.

use crate::types::MinMaxAABB;

/// Receives the world bounds of every cell that emits geometry.
pub trait DebugSink {
  /// Called once per active cell, in traversal order.
  fn add_active_cube(&mut self, bounds: MinMaxAABB);
}

impl DebugSink for Vec<MinMaxAABB> {
  #[inline]
  fn add_active_cube(&mut self, bounds: MinMaxAABB) {
    self.push(bounds);
  }
}

/// Sink that only counts active cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveCellCounter {
  pub count: usize,
}

impl DebugSink for ActiveCellCounter {
  #[inline]
  fn add_active_cube(&mut self, _bounds: MinMaxAABB) {
    self.count += 1;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vec_sink_collects_bounds() {
    let mut sink: Vec<MinMaxAABB> = Vec::new();
    let bounds = MinMaxAABB::new([0.0; 3], [1.0; 3]);
    sink.add_active_cube(bounds);
    assert_eq!(sink, vec![bounds]);
  }

  #[test]
  fn counter_sink_counts() {
    let mut sink = ActiveCellCounter::default();
    let sink_ref: &mut dyn DebugSink = &mut sink;
    sink_ref.add_active_cube(MinMaxAABB::empty());
    sink_ref.add_active_cube(MinMaxAABB::empty());
    assert_eq!(sink.count, 2);
  }
}
