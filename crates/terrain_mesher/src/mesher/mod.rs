//! Regular cell (Transvoxel-style) chunk meshing.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  grid: VoxelGrid         - size³ i8 SDF samples                 │
//! │  config: MesherConfig    - origin, voxel size, policies         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PASS 1: Geometry                             │
//! │  for y, for z, for x (X fastest):                               │
//! │    classify 8 corners → case code, direction mask               │
//! │    skip empty cells                                             │
//! │    resolve vertex slots (reuse cache or new vertex)             │
//! │    emit triangles in table order                                │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PASS 2: Normals                              │
//! │  Gradient: trilinear gradient of the creating cell              │
//! │  Geometry: angle-weighted face normals                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        OUTPUT                                   │
//! │  vertices, indices, cell_bounds, bounds, stats                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An invocation owns its cache and buffers and spawns no threads. Any
//! number of invocations may run concurrently on different threads.

mod classify;
mod debug;
mod interpolate;
mod normals;
mod polygonize;
mod reuse_cache;

pub use classify::{case_code, classify, direction_mask, is_empty, Classification};
pub use debug::{ActiveCellCounter, DebugSink};
pub use interpolate::{crossing_parameter, lattice_position, world_position};
pub use normals::{gradient, gradient_at, recalculate_from_geometry};
pub use polygonize::{CellOutcome, CellPolygonizer};
pub use reuse_cache::{ReuseSlots, VertexReuseCache};

use web_time::Instant;

use crate::error::MeshError;
use crate::field::ScalarField;
use crate::grid::VoxelGrid;
use crate::types::{MeshOutput, MesherConfig};

/// Chunk mesher with a validated configuration.
#[derive(Clone, Debug)]
pub struct TerrainMesher {
  config: MesherConfig,
}

impl TerrainMesher {
  /// Create a mesher, rejecting invalid configuration up front.
  pub fn new(config: MesherConfig) -> Result<Self, MeshError> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn config(&self) -> &MesherConfig {
    &self.config
  }

  /// Sample `field` over the configured chunk and mesh the result.
  #[tracing::instrument(skip_all, name = "mesher::mesh_field", fields(origin = ?self.config.origin))]
  pub fn mesh_field<F: ScalarField + ?Sized>(&self, field: &F) -> Result<MeshOutput, MeshError> {
    let grid = VoxelGrid::sample(field, &self.config)?;
    self.mesh_grid(&grid)
  }

  /// Mesh an already sampled grid. The grid's own size is used; the
  /// configured grid size only applies to sampling.
  pub fn mesh_grid(&self, grid: &VoxelGrid) -> Result<MeshOutput, MeshError> {
    run(grid, &self.config, None)
  }

  /// Like [`mesh_grid`](Self::mesh_grid), also reporting every active cell to
  /// `sink`.
  pub fn mesh_grid_with_sink(
    &self,
    grid: &VoxelGrid,
    sink: &mut dyn DebugSink,
  ) -> Result<MeshOutput, MeshError> {
    run(grid, &self.config, Some(sink))
  }
}

/// Mesh a sampled grid with the given configuration.
///
/// # Example
///
/// ```
/// use terrain_mesher::{mesher, sdf_samplers::GroundPlaneSampler, MesherConfig, VoxelGrid};
///
/// let config = MesherConfig::new().with_grid_size(8);
/// let grid = VoxelGrid::sample(&GroundPlaneSampler::new(3.5), &config).unwrap();
/// let output = mesher::generate(&grid, &config).unwrap();
///
/// assert_eq!(output.triangle_count(), 7 * 7 * 2);
/// ```
pub fn generate(grid: &VoxelGrid, config: &MesherConfig) -> Result<MeshOutput, MeshError> {
  config.validate()?;
  run(grid, config, None)
}

#[tracing::instrument(skip_all, name = "mesher::run", fields(size = grid.size()))]
fn run(
  grid: &VoxelGrid,
  config: &MesherConfig,
  mut sink: Option<&mut dyn DebugSink>,
) -> Result<MeshOutput, MeshError> {
  let start = Instant::now();
  let cells = grid.cells_per_axis();
  let window = config
    .cache_window
    .unwrap_or_else(|| VertexReuseCache::default_window(cells));

  let mut cache = VertexReuseCache::with_window(cells, window);
  let mut output = MeshOutput::new();
  let polygonizer = CellPolygonizer::new(grid, config);

  // =========================================================================
  // Pass 1: Geometry
  // =========================================================================
  for y in 0..cells {
    for z in 0..cells {
      for x in 0..cells {
        output.stats.cells_visited += 1;
        match polygonizer.polygonize([x, y, z], &mut cache, &mut output)? {
          CellOutcome::Empty => output.stats.empty_cells += 1,
          CellOutcome::Active { bounds, .. } => {
            output.stats.active_cells += 1;
            if let Some(sink) = sink.as_deref_mut() {
              sink.add_active_cube(bounds);
            }
          }
        }
      }
    }
  }

  // =========================================================================
  // Pass 2: Normals
  // =========================================================================
  normals::compute(grid, &mut output, config);

  output.stats.timing_us = start.elapsed().as_micros() as u64;

  tracing::debug!(
    vertices = output.vertices.len(),
    triangles = output.triangle_count(),
    active_cells = output.stats.active_cells,
    reuse_ratio = output.stats.reuse_ratio(),
    timing_us = output.stats.timing_us,
    "chunk meshed"
  );

  Ok(output)
}
