//! Batch meshing of independent chunks.
//!
//! Thin wrapper around [`TerrainMesher`] that:
//! - Samples and meshes each chunk with its own grid and reuse cache
//! - Processes chunks in parallel via rayon
//! - Tracks timing per chunk
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ Batch Meshing                                                           │
//! │                                                                         │
//! │  origins: [[f32; 3]]        field: &F        config: &MesherConfig      │
//! │           │                                                             │
//! │           ▼  (rayon, one task per origin)                               │
//! │  ┌─────────────────────────────────────────────────────────┐            │
//! │  │ VoxelGrid::sample(field, config.with_origin(origin))    │            │
//! │  │ TerrainMesher::mesh_grid(&grid)                         │            │
//! │  └─────────────────────────────────────────────────────────┘            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ChunkResult { origin, result, timing_us }   (input order)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use web_time::Instant;

use rayon::prelude::*;

use crate::error::MeshError;
use crate::field::ScalarField;
use crate::mesher::TerrainMesher;
use crate::metrics::MeshStats;
use crate::types::{MeshOutput, MesherConfig};

/// Outcome of meshing one chunk.
#[derive(Clone, Debug)]
pub struct ChunkResult {
  /// World-space origin of the chunk.
  pub origin: [f32; 3],
  /// Mesh, or the error that aborted this chunk.
  pub result: Result<MeshOutput, MeshError>,
  /// Wall time including sampling, in microseconds.
  pub timing_us: u64,
}

/// Sample and mesh a single chunk at `origin`.
///
/// `config.origin` is replaced by `origin`; everything else is shared.
pub fn mesh_chunk<F: ScalarField + ?Sized>(
  field: &F,
  config: &MesherConfig,
  origin: [f32; 3],
) -> ChunkResult {
  let start = Instant::now();
  let result = TerrainMesher::new(config.clone().with_origin(origin))
    .and_then(|mesher| mesher.mesh_field(field));
  let timing_us = start.elapsed().as_micros() as u64;

  ChunkResult {
    origin,
    result,
    timing_us,
  }
}

/// Mesh many chunks in parallel using rayon.
///
/// Results maintain the same order as `origins`. A failing chunk does not
/// affect the others.
#[tracing::instrument(skip_all, name = "pipeline::mesh_batch", fields(chunks = origins.len()))]
pub fn mesh_batch<F: ScalarField + ?Sized>(
  field: &F,
  config: &MesherConfig,
  origins: &[[f32; 3]],
) -> Vec<ChunkResult> {
  if origins.is_empty() {
    return Vec::new();
  }

  origins
    .par_iter()
    .map(|&origin| mesh_chunk(field, config, origin))
    .collect()
}

/// Sum the statistics of every successful chunk.
pub fn total_stats(results: &[ChunkResult]) -> MeshStats {
  let mut total = MeshStats::default();
  for output in results.iter().filter_map(|r| r.result.as_ref().ok()) {
    total.accumulate(&output.stats);
  }
  total
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
