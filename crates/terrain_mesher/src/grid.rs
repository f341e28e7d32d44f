//! Voxel grid: a cube of quantized SDF samples for one chunk.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ScalarField (world space)                                      │
//! │     │                                                           │
//! │     │  world = origin + [x, y, z] * voxel_size                  │
//! │     ▼                                                           │
//! │  to_storage(distance, sdf_scale)  ── sign preserving i8         │
//! │     │                                                           │
//! │     ▼                                                           │
//! │  samples[x + z * size + y * size²]                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use glam::Vec3;

use crate::constants::{cells_per_axis, CORNER_OFFSETS};
use crate::error::MeshError;
use crate::field::ScalarField;
use crate::types::{sdf_conversion, validate_grid_size, MesherConfig, SdfSample};

/// Cube of `size³` SDF samples, X-fastest then Z then Y.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
  size: usize,
  samples: Vec<SdfSample>,
}

impl std::fmt::Debug for VoxelGrid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "VoxelGrid({}³ samples)", self.size)
  }
}

impl VoxelGrid {
  /// Create a grid with every sample set to `fill`.
  pub fn filled(size: usize, fill: SdfSample) -> Result<Self, MeshError> {
    validate_grid_size(size)?;
    Ok(Self {
      size,
      samples: vec![fill; size * size * size],
    })
  }

  /// Wrap an existing sample buffer laid out as `x + z * size + y * size²`.
  pub fn from_samples(size: usize, samples: Vec<SdfSample>) -> Result<Self, MeshError> {
    validate_grid_size(size)?;
    let expected = size * size * size;
    if samples.len() != expected {
      return Err(MeshError::SampleCountMismatch {
        expected,
        actual: samples.len(),
      });
    }
    Ok(Self { size, samples })
  }

  /// Build a grid from a function of lattice coordinates.
  pub fn from_fn(
    size: usize,
    mut sample: impl FnMut([usize; 3]) -> SdfSample,
  ) -> Result<Self, MeshError> {
    validate_grid_size(size)?;
    let mut samples = Vec::with_capacity(size * size * size);
    for y in 0..size {
      for z in 0..size {
        for x in 0..size {
          samples.push(sample([x, y, z]));
        }
      }
    }
    Ok(Self { size, samples })
  }

  /// Sample `field` at every lattice point of the chunk described by
  /// `config`.
  ///
  /// Deterministic: the same field and config always produce the same grid.
  #[tracing::instrument(skip_all, name = "grid::sample", fields(size = config.grid_size))]
  pub fn sample<F: ScalarField + ?Sized>(
    field: &F,
    config: &MesherConfig,
  ) -> Result<Self, MeshError> {
    config.validate()?;
    let size = config.grid_size;
    let origin = Vec3::from_array(config.origin);
    let mut samples = Vec::with_capacity(size * size * size);

    for y in 0..size {
      for z in 0..size {
        for x in 0..size {
          let position = origin + Vec3::new(x as f32, y as f32, z as f32) * config.voxel_size;
          let distance = field.distance(position);
          if !distance.is_finite() {
            return Err(MeshError::NonFiniteSample {
              position: position.to_array(),
            });
          }
          samples.push(sdf_conversion::to_storage(distance, config.sdf_scale));
        }
      }
    }

    Ok(Self { size, samples })
  }

  /// Samples per axis.
  #[inline]
  pub fn size(&self) -> usize {
    self.size
  }

  /// Cells per axis.
  #[inline]
  pub fn cells_per_axis(&self) -> usize {
    cells_per_axis(self.size)
  }

  /// Raw sample buffer.
  #[inline]
  pub fn samples(&self) -> &[SdfSample] {
    &self.samples
  }

  /// Linear index of lattice point (x, y, z).
  #[inline(always)]
  pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
    x + self.size * (z + self.size * y)
  }

  /// Sample at a lattice point, `None` outside the grid.
  #[inline]
  pub fn get(&self, point: [usize; 3]) -> Option<SdfSample> {
    let [x, y, z] = point;
    if x < self.size && y < self.size && z < self.size {
      self.samples.get(self.index(x, y, z)).copied()
    } else {
      None
    }
  }

  /// Overwrite a lattice sample. Returns false if the point is outside the
  /// grid.
  pub fn set(&mut self, point: [usize; 3], value: SdfSample) -> bool {
    let [x, y, z] = point;
    if x < self.size && y < self.size && z < self.size {
      let index = self.index(x, y, z);
      self.samples[index] = value;
      true
    } else {
      false
    }
  }

  /// The 8 corner samples of a cell, in corner index order.
  ///
  /// `cell` must lie in `[0, size - 1)³`.
  #[inline]
  pub fn cell_corners(&self, cell: [usize; 3]) -> [SdfSample; 8] {
    debug_assert!(cell.iter().all(|&c| c < self.cells_per_axis()));
    let [x, y, z] = cell;
    std::array::from_fn(|i| {
      let [dx, dy, dz] = CORNER_OFFSETS[i];
      self.samples[self.index(x + dx, y + dy, z + dz)]
    })
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
