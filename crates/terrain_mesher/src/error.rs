//! Error types for chunk meshing.
//!
//! Every variant aborts the whole meshing invocation. Recoverable situations
//! (reuse cache misses, equal corner distances) are handled inside the kernel
//! and never surface here.

use thiserror::Error;

/// Failure of a meshing invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
  /// Grid extent outside `[MIN_GRID_SIZE, MAX_GRID_SIZE]`.
  #[error("grid size {size} is outside the supported range [{min}, {max}]")]
  InvalidGridSize { size: usize, min: usize, max: usize },

  /// Sample buffer length does not match `size³`.
  #[error("expected {expected} samples for the grid, got {actual}")]
  SampleCountMismatch { expected: usize, actual: usize },

  /// Voxel size is not a finite positive number.
  #[error("voxel size {voxel_size} must be finite and positive")]
  InvalidVoxelSize { voxel_size: f32 },

  /// SDF quantization scale is not a finite positive number.
  #[error("sdf scale {sdf_scale} must be finite and positive")]
  InvalidSdfScale { sdf_scale: f32 },

  /// The scalar field returned NaN or infinity.
  #[error("scalar field returned a non-finite value at {position:?}")]
  NonFiniteSample { position: [f32; 3] },

  /// A cell corner sample lies exactly on the isosurface and the boundary
  /// policy rejects it.
  #[error("cell {cell:?} corner {corner} sampled exactly on the isosurface")]
  BoundarySample { cell: [usize; 3], corner: u8 },

  /// A case code mapped outside the equivalence class table.
  #[error("case code {case_code:#04x} has no equivalence class (corrupted case tables)")]
  MissingCase { case_code: u8 },
}
