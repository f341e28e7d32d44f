//! Per-invocation meshing statistics.
//!
//! Counters are plain integers updated on the meshing thread, so collecting
//! them costs a handful of adds per cell. They are returned with every
//! [`MeshOutput`](crate::MeshOutput) and are useful for checking vertex reuse
//! efficiency in tests and benchmarks.

/// Counters collected during one meshing invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
  /// Cells visited by the traversal.
  pub cells_visited: u64,
  /// Cells skipped because all corners share a sign.
  pub empty_cells: u64,
  /// Cells that emitted geometry.
  pub active_cells: u64,
  /// Vertices appended to the vertex buffer.
  pub vertices_created: u64,
  /// Vertex slots resolved to an already emitted vertex.
  pub vertices_reused: u64,
  /// Reuse was permitted by the direction mask but the cache had no entry.
  pub reuse_misses: u64,
  /// Triangles appended to the index buffer.
  pub triangles: u64,
  /// Wall time of the invocation in microseconds.
  pub timing_us: u64,
}

impl MeshStats {
  /// Fraction of resolved vertex slots served from the cache.
  pub fn reuse_ratio(&self) -> f64 {
    let resolved = self.vertices_created + self.vertices_reused;
    if resolved == 0 {
      0.0
    } else {
      self.vertices_reused as f64 / resolved as f64
    }
  }

  /// Fold another invocation's counters into this one.
  pub fn accumulate(&mut self, other: &MeshStats) {
    self.cells_visited += other.cells_visited;
    self.empty_cells += other.empty_cells;
    self.active_cells += other.active_cells;
    self.vertices_created += other.vertices_created;
    self.vertices_reused += other.vertices_reused;
    self.reuse_misses += other.reuse_misses;
    self.triangles += other.triangles;
    self.timing_us += other.timing_us;
  }
}
