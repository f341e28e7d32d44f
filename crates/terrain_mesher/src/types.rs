//! Core data types for regular cell meshing.

use crate::constants::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::error::MeshError;
use crate::metrics::MeshStats;

/// Signed distance field sample value.
/// Negative = inside/solid, non-negative = outside/air.
pub type SdfSample = i8;

/// 8-bit cell classification. Bit `i` is set when corner `i` is inside.
pub type CaseCode = u8;

/// 3-bit mask of preceding neighbor cells that exist (bit 0 = x, 1 = y, 2 = z).
pub type DirectionMask = u8;

/// What to do with a corner sample that is exactly zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
  /// Zero is outside, like every other non-negative value.
  #[default]
  TreatAsOutside,

  /// Abort the meshing invocation with [`MeshError::BoundarySample`].
  Reject,
}

/// Normal computation mode for mesh generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalMode {
  /// Gradient of the generating cell's 8 corner samples.
  #[default]
  Gradient,

  /// Angle-weighted average of the adjacent triangle normals.
  Geometry,
}

/// SDF conversion utilities for quantized storage.
///
/// Maps float SDF to i8 [-127, +127]. With the default scale a ±10 world unit
/// range is representable at ~0.079 world units per level.
pub mod sdf_conversion {
  /// SDF range in world units covered by the default scale.
  pub const RANGE: f32 = 10.0;

  /// Default scale factor: 127 / RANGE = 12.7
  pub const SCALE: f32 = 127.0 / RANGE;

  /// Inverse of the default scale.
  pub const INV_SCALE: f32 = RANGE / 127.0;

  /// Convert float SDF to quantized i8 storage.
  ///
  /// Quantization keeps the sign: values too small to survive rounding become
  /// ±1, so only an exact zero maps to 0.
  #[inline(always)]
  pub fn to_storage(sdf: f32, scale: f32) -> i8 {
    let quantized = (sdf * scale).clamp(-127.0, 127.0).round() as i8;
    if quantized != 0 {
      quantized
    } else if sdf > 0.0 {
      1
    } else if sdf < 0.0 {
      -1
    } else {
      0
    }
  }

  /// Convert quantized i8 storage back to float SDF.
  #[inline(always)]
  pub fn to_float(value: i8, scale: f32) -> f32 {
    value as f32 / scale
  }
}

/// Output vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  /// World-space position.
  pub position: [f32; 3],

  /// Surface normal (unit vector).
  pub normal: [f32; 3],

  /// Cell that created the vertex, in chunk-local cell coordinates.
  pub cell_position: [i32; 3],
}

impl Default for Vertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 1.0, 0.0],
      cell_position: [0; 3],
    }
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }

  /// Check if a point lies inside or on the box.
  pub fn contains(&self, point: [f32; 3]) -> bool {
    (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Mesh generation result for one chunk.
#[derive(Clone, Debug, Default)]
pub struct MeshOutput {
  /// Output vertices in creation order.
  pub vertices: Vec<Vertex>,

  /// Triangle indices (3 indices per triangle), winding as encoded by the
  /// case tables.
  pub indices: Vec<u32>,

  /// World-space bounds of every cell that produced geometry, in traversal
  /// order.
  pub cell_bounds: Vec<MinMaxAABB>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,

  /// Counters collected while meshing.
  pub stats: MeshStats,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.cell_bounds.clear();
    self.bounds = MinMaxAABB::empty();
    self.stats = MeshStats::default();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Iterate triangles as index triples.
  pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
    self
      .indices
      .chunks_exact(3)
      .map(|tri| [tri[0], tri[1], tri[2]])
  }
}

/// Configuration for chunk meshing.
#[derive(Clone, Debug)]
pub struct MesherConfig {
  /// Samples per axis (cells per axis = grid_size - 1).
  pub grid_size: usize,

  /// World-space position of lattice point (0, 0, 0).
  pub origin: [f32; 3],

  /// Distance between adjacent lattice points in world units.
  pub voxel_size: f32,

  /// Multiplier applied to field values before i8 quantization.
  pub sdf_scale: f32,

  /// Handling of samples exactly on the isosurface.
  pub boundary_policy: BoundaryPolicy,

  /// Normal computation mode.
  pub normal_mode: NormalMode,

  /// Vertex reuse window in cells. `None` derives it from the traversal
  /// strides (one plane + one row + one cell).
  pub cache_window: Option<usize>,
}

impl Default for MesherConfig {
  fn default() -> Self {
    Self {
      grid_size: DEFAULT_GRID_SIZE,
      origin: [0.0; 3],
      voxel_size: 1.0,
      sdf_scale: sdf_conversion::SCALE,
      boundary_policy: BoundaryPolicy::default(),
      normal_mode: NormalMode::default(),
      cache_window: None,
    }
  }
}

impl MesherConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_grid_size(mut self, size: usize) -> Self {
    self.grid_size = size;
    self
  }

  pub fn with_origin(mut self, origin: [f32; 3]) -> Self {
    self.origin = origin;
    self
  }

  pub fn with_voxel_size(mut self, size: f32) -> Self {
    self.voxel_size = size;
    self
  }

  pub fn with_sdf_scale(mut self, scale: f32) -> Self {
    self.sdf_scale = scale;
    self
  }

  pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
    self.boundary_policy = policy;
    self
  }

  pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
    self.normal_mode = mode;
    self
  }

  pub fn with_cache_window(mut self, window: usize) -> Self {
    self.cache_window = Some(window);
    self
  }

  /// Check grid extent, voxel size and quantization scale.
  pub fn validate(&self) -> Result<(), MeshError> {
    validate_grid_size(self.grid_size)?;
    if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
      return Err(MeshError::InvalidVoxelSize {
        voxel_size: self.voxel_size,
      });
    }
    if !self.sdf_scale.is_finite() || self.sdf_scale <= 0.0 {
      return Err(MeshError::InvalidSdfScale {
        sdf_scale: self.sdf_scale,
      });
    }
    Ok(())
  }
}

/// Check a grid extent against the supported range.
pub(crate) fn validate_grid_size(size: usize) -> Result<(), MeshError> {
  if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
    Ok(())
  } else {
    Err(MeshError::InvalidGridSize {
      size,
      min: MIN_GRID_SIZE,
      max: MAX_GRID_SIZE,
    })
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
