//! Per-cell polygonization.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  8 corner samples ──► classify ──► empty? ──► done              │
//! │                          │                                      │
//! │                          ▼                                      │
//! │               CaseTables::lookup(case)                          │
//! │                          │                                      │
//! │        for each vertex slot of the equivalence class:           │
//! │          t on a corner? ──► corner vertex (slot 0 of owner)     │
//! │          reuse allowed?  ──► neighbor cell slot from cache      │
//! │          miss           ──► interpolate + append new vertex     │
//! │          corner 7 edge  ──► publish in this cell's slots        │
//! │                          │                                      │
//! │                          ▼                                      │
//! │        commit owned slots, emit triangles in table order        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use smallvec::SmallVec;

use super::classify::{classify, direction_mask, is_empty, Classification};
use super::interpolate::{crossing_parameter, lands_on_corner, lattice_position, world_position};
use super::reuse_cache::{ReuseSlots, VertexReuseCache};
use crate::case_tables::{CaseTables, RegularVertex, MAX_CELL_VERTICES};
use crate::constants::{
  CORNER_REUSE_SLOT, DIRECTION_MASK_ALL, FIXED_POINT_ONE, OWNED_CORNER, REUSE_SLOTS,
};
use crate::error::MeshError;
use crate::grid::VoxelGrid;
use crate::types::{CaseCode, DirectionMask, MeshOutput, MesherConfig, MinMaxAABB, Vertex};

/// What one cell contributed to the mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellOutcome {
  /// All corners share a sign.
  Empty,

  /// The cell emitted geometry.
  Active {
    case_code: CaseCode,
    vertices: usize,
    triangles: usize,
    bounds: MinMaxAABB,
  },
}

/// Scratch state of the cell being polygonized.
struct CellState {
  cell: [usize; 3],
  mask: DirectionMask,
  owned: ReuseSlots,
  corner_vertices: [Option<u32>; 8],
}

/// Polygonizes cells of one grid into a shared output.
pub struct CellPolygonizer<'a> {
  grid: &'a VoxelGrid,
  config: &'a MesherConfig,
}

impl<'a> CellPolygonizer<'a> {
  pub fn new(grid: &'a VoxelGrid, config: &'a MesherConfig) -> Self {
    Self { grid, config }
  }

  /// Polygonize `cell`, appending vertices and indices to `output`.
  ///
  /// Cells must be visited in traversal order for `cache` lookups to find
  /// their neighbors.
  pub fn polygonize(
    &self,
    cell: [usize; 3],
    cache: &mut VertexReuseCache,
    output: &mut MeshOutput,
  ) -> Result<CellOutcome, MeshError> {
    let corners = self.grid.cell_corners(cell);

    let case_code = match classify(&corners, self.config.boundary_policy) {
      Classification::Valid(case_code) => case_code,
      Classification::DegenerateSample { corner } => {
        tracing::warn!(?cell, corner, "rejecting sample exactly on the isosurface");
        return Err(MeshError::BoundarySample { cell, corner });
      }
    };

    if is_empty(case_code, &corners) {
      return Ok(CellOutcome::Empty);
    }

    let entry = CaseTables::lookup(case_code)?;
    let mut state = CellState {
      cell,
      mask: direction_mask(cell),
      owned: [None; REUSE_SLOTS],
      corner_vertices: [None; 8],
    };

    let created_before = output.vertices.len();
    let mut global: SmallVec<[u32; MAX_CELL_VERTICES]> = SmallVec::new();

    for slot in 0..entry.cell.vertex_count() {
      let vertex = entry.vertex(slot);
      let (c0, c1) = (vertex.corner0(), vertex.corner1());
      let t = crossing_parameter(corners[c0 as usize], corners[c1 as usize]);

      let index = if lands_on_corner(t) {
        let corner = if t == 0 { c1 } else { c0 };
        self.resolve_corner_vertex(&mut state, corner, cache, output)
      } else {
        self.resolve_edge_vertex(&mut state, vertex, t, cache, output)
      };
      global.push(index);
    }

    // Lookups are done; the farthest neighbor's ring slot may now be reused
    cache.commit(cell, state.owned);

    let indices = entry.cell.indices();
    output
      .indices
      .extend(indices.iter().map(|&slot| global[slot as usize]));

    let triangles = entry.cell.triangle_count();
    output.stats.triangles += triangles as u64;

    let bounds = self.cell_bounds(cell);
    output.cell_bounds.push(bounds);

    tracing::trace!(
      ?cell,
      case_code,
      class = entry.class_index,
      triangles,
      "cell polygonized"
    );

    Ok(CellOutcome::Active {
      case_code,
      vertices: output.vertices.len() - created_before,
      triangles,
      bounds,
    })
  }

  /// Vertex strictly inside an edge: reuse from the owning cell or create.
  fn resolve_edge_vertex(
    &self,
    state: &mut CellState,
    vertex: RegularVertex,
    t: i32,
    cache: &VertexReuseCache,
    output: &mut MeshOutput,
  ) -> u32 {
    let direction = vertex.reuse_direction();

    if vertex.corner1() != OWNED_CORNER && direction & state.mask == direction {
      let cached = VertexReuseCache::neighbor(state.cell, direction)
        .and_then(|owner| cache.get(owner, vertex.reuse_slot()));
      if let Some(index) = cached {
        output.stats.vertices_reused += 1;
        return index;
      }
      output.stats.reuse_misses += 1;
    }

    let fixed = lattice_position(state.cell, vertex.corner0(), vertex.corner1(), t);
    let index = self.push_vertex(state.cell, fixed, output);

    if vertex.creates_reusable() {
      state.owned[vertex.reuse_slot() as usize] = Some(index);
    }
    index
  }

  /// Vertex exactly on a lattice corner: shared through slot 0 of the cell
  /// whose corner 7 it is.
  fn resolve_corner_vertex(
    &self,
    state: &mut CellState,
    corner: u8,
    cache: &VertexReuseCache,
    output: &mut MeshOutput,
  ) -> u32 {
    if let Some(index) = state.corner_vertices[corner as usize] {
      output.stats.vertices_reused += 1;
      return index;
    }

    let mut cached = None;
    if corner != OWNED_CORNER {
      let direction = !corner & DIRECTION_MASK_ALL;
      if direction & state.mask == direction {
        cached = VertexReuseCache::neighbor(state.cell, direction)
          .and_then(|owner| cache.get(owner, CORNER_REUSE_SLOT));
        if cached.is_none() {
          output.stats.reuse_misses += 1;
        }
      }
    }

    let index = match cached {
      Some(index) => {
        output.stats.vertices_reused += 1;
        index
      }
      None => {
        let fixed = lattice_position(state.cell, corner, corner, FIXED_POINT_ONE);
        let index = self.push_vertex(state.cell, fixed, output);
        if corner == OWNED_CORNER {
          state.owned[CORNER_REUSE_SLOT as usize] = Some(index);
        }
        index
      }
    };

    state.corner_vertices[corner as usize] = Some(index);
    index
  }

  fn push_vertex(&self, cell: [usize; 3], fixed: [i32; 3], output: &mut MeshOutput) -> u32 {
    let position = world_position(fixed, self.config.origin, self.config.voxel_size);
    let index = output.vertices.len() as u32;

    output.vertices.push(Vertex {
      position,
      // Filled by the normal pass
      normal: [0.0, 1.0, 0.0],
      cell_position: [cell[0] as i32, cell[1] as i32, cell[2] as i32],
    });
    output.bounds.encapsulate(position);
    output.stats.vertices_created += 1;
    index
  }

  /// World-space bounds of a cell.
  pub fn cell_bounds(&self, cell: [usize; 3]) -> MinMaxAABB {
    let size = self.config.voxel_size;
    let min: [f32; 3] =
      std::array::from_fn(|axis| self.config.origin[axis] + cell[axis] as f32 * size);
    let max = min.map(|m| m + size);
    MinMaxAABB::new(min, max)
  }
}

#[cfg(test)]
#[path = "polygonize_test.rs"]
mod polygonize_test;
