//! Normal pass.
//!
//! Runs after every cell has been polygonized, when vertex and index buffers
//! are final.
//!
//! - [`NormalMode::Gradient`]: trilinear SDF gradient of the cell that created
//!   the vertex, evaluated at the vertex position inside that cell.
//! - [`NormalMode::Geometry`]: angle-weighted average of adjacent face normals
//!   (Thürmer & Wüthrich, "Computing Vertex Normals from Polygonal Facets",
//!   1998).
//!
//! Both point from inside (negative) toward outside (non-negative), matching
//! the triangle winding of the case tables.

use glam::Vec3A;

use crate::grid::VoxelGrid;
use crate::types::{sdf_conversion, MeshOutput, MesherConfig, NormalMode};

const FALLBACK_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Fill `output` vertex normals according to `config.normal_mode`.
#[tracing::instrument(skip_all, name = "normals::compute")]
pub fn compute(grid: &VoxelGrid, output: &mut MeshOutput, config: &MesherConfig) {
  match config.normal_mode {
    NormalMode::Gradient => compute_gradient_normals(grid, output, config),
    NormalMode::Geometry => recalculate_from_geometry(output),
  }
}

fn compute_gradient_normals(grid: &VoxelGrid, output: &mut MeshOutput, config: &MesherConfig) {
  let origin = Vec3A::from_array(config.origin);
  let inv_voxel = config.voxel_size.recip();

  for vertex in &mut output.vertices {
    let [x, y, z] = vertex.cell_position;
    let cell = [x as usize, y as usize, z as usize];
    let samples: [f32; 8] = grid
      .cell_corners(cell)
      .map(|s| sdf_conversion::to_float(s, config.sdf_scale));

    let cell_origin = Vec3A::new(x as f32, y as f32, z as f32);
    let local = ((Vec3A::from_array(vertex.position) - origin) * inv_voxel - cell_origin)
      .clamp(Vec3A::ZERO, Vec3A::ONE);

    vertex.normal = gradient_at(&samples, local.to_array());
  }
}

/// Gradient normal of a cell from its 8 corner samples (cell center).
///
/// Corner layout:
/// ```text
/// 0: (0,0,0)  4: (0,0,1)
/// 1: (1,0,0)  5: (1,0,1)
/// 2: (0,1,0)  6: (0,1,1)
/// 3: (1,1,0)  7: (1,1,1)
/// ```
#[inline]
pub fn gradient(samples: &[f32; 8]) -> [f32; 3] {
  gradient_at(samples, [0.5, 0.5, 0.5])
}

/// Gradient of the trilinear interpolant at `local` ∈ [0, 1]³.
#[inline]
pub fn gradient_at(samples: &[f32; 8], local: [f32; 3]) -> [f32; 3] {
  let [u, v, w] = local;

  // Differences along each axis, bilinearly weighted over the other two
  let gx = (1.0 - v) * (1.0 - w) * (samples[1] - samples[0])
    + v * (1.0 - w) * (samples[3] - samples[2])
    + (1.0 - v) * w * (samples[5] - samples[4])
    + v * w * (samples[7] - samples[6]);

  let gy = (1.0 - u) * (1.0 - w) * (samples[2] - samples[0])
    + u * (1.0 - w) * (samples[3] - samples[1])
    + (1.0 - u) * w * (samples[6] - samples[4])
    + u * w * (samples[7] - samples[5]);

  let gz = (1.0 - u) * (1.0 - v) * (samples[4] - samples[0])
    + u * (1.0 - v) * (samples[5] - samples[1])
    + (1.0 - u) * v * (samples[6] - samples[2])
    + u * v * (samples[7] - samples[3]);

  normalize_or_up(Vec3A::new(gx, gy, gz))
}

/// Recalculate normals from triangle geometry using angle-weighted averaging.
///
/// Each face's contribution to a vertex normal is weighted by the interior
/// angle of the triangle at that vertex.
pub fn recalculate_from_geometry(output: &mut MeshOutput) {
  let mut accum = vec![Vec3A::ZERO; output.vertices.len()];

  for [i0, i1, i2] in output.triangles() {
    let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
    let p0 = Vec3A::from_array(output.vertices[i0].position);
    let p1 = Vec3A::from_array(output.vertices[i1].position);
    let p2 = Vec3A::from_array(output.vertices[i2].position);

    let e01 = p1 - p0;
    let e02 = p2 - p0;
    let e12 = p2 - p1;

    let face_normal = e01.cross(e02);
    let face_len_sq = face_normal.length_squared();

    // Skip degenerate triangles
    if face_len_sq < 1e-12 {
      continue;
    }

    let face_normal_unit = face_normal * face_len_sq.sqrt().recip();

    accum[i0] += face_normal_unit * vertex_angle(e01, e02);
    accum[i1] += face_normal_unit * vertex_angle(-e01, e12);
    accum[i2] += face_normal_unit * vertex_angle(-e02, -e12);
  }

  for (vertex, normal) in output.vertices.iter_mut().zip(accum) {
    vertex.normal = normalize_or_up(normal);
  }
}

/// Angle between two edge vectors at a vertex, in radians.
#[inline]
fn vertex_angle(e1: Vec3A, e2: Vec3A) -> f32 {
  let len1_sq = e1.length_squared();
  let len2_sq = e2.length_squared();

  if len1_sq < 1e-12 || len2_sq < 1e-12 {
    return 0.0;
  }

  let cos_angle = e1.dot(e2) / (len1_sq.sqrt() * len2_sq.sqrt());

  // Clamp to [-1, 1] to handle floating point errors
  cos_angle.clamp(-1.0, 1.0).acos()
}

#[inline]
fn normalize_or_up(v: Vec3A) -> [f32; 3] {
  let len_sq = v.length_squared();
  if len_sq < 1e-12 {
    FALLBACK_NORMAL
  } else {
    (v * len_sq.sqrt().recip()).to_array()
  }
}

#[cfg(test)]
#[path = "normals_test.rs"]
mod normals_test;
