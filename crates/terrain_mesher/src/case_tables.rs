//! Regular cell case tables, generated at compile time.
//!
//! Maps each 8-bit case code to an equivalence class (triangle topology) and
//! to per-vertex edge/reuse encodings.
//!
//! # Cube Topology
//!
//! ```text
//!       6──────7         Corners (binary ZYX):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(0,1,0)  3=(1,1,0)
//!     4─┼────5 │           4=(0,0,1)  5=(1,0,1)  6=(0,1,1)  7=(1,1,1)
//!     │ 2────┼─3
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! # Generation
//!
//! For every case code the surface is traced across the six faces. Each face
//! is walked counter-clockwise as seen from outside the cell; every edge
//! entering the inside region is linked to the next edge leaving it. On a face
//! with alternating signs this keeps the two inside corners apart, and since
//! that choice only depends on the face's own corners, the neighbor sharing
//! the face makes the same choice and no cracks appear.
//!
//! The links form closed loops, found in order of their lowest crossing edge.
//! Each loop is split into a triangle fan around the first vertex whose fan
//! keeps every triangle out of the cell faces; vertex slots follow the loop
//! from that apex. The resulting triangles are wound counter-clockwise when
//! viewed from the outside (non-negative) side.
//!
//! Deduplicating the (vertex count, triangle list) pairs leaves 16 classes.
//!
//! # Vertex Encoding
//!
//! ```text
//!  15   14..12    11..8      7..4   3..0
//! ┌───┬─────────┬─────────┬───────┬──────┐
//! │new│direction│reuse    │ c0    │ c1   │
//! │   │ z  y  x │slot     │       │      │
//! └───┴─────────┴─────────┴───────┴──────┘
//!
//! direction: preceding cell that owns the edge (x-1, y-1, z-1 bits)
//! new:       edge ends at corner 7, the vertex is created here and published
//! slot:      1 = y edge (5,7), 2 = x edge (6,7), 3 = z edge (3,7) of the owner
//! ```

use crate::constants::{OWNED_CORNER, REUSE_NEW_VERTEX};
use crate::error::MeshError;
use crate::types::CaseCode;

/// Maximum vertices one regular cell can produce.
pub const MAX_CELL_VERTICES: usize = 12;

/// Maximum triangles one regular cell can produce.
pub const MAX_CELL_TRIANGLES: usize = 5;

/// Number of distinct equivalence classes.
pub const REGULAR_CLASS_COUNT: usize = 16;

/// Edge endpoint corner indices, lower corner first.
///
/// Corner layout (binary: ZYX):
/// - 0 = (0,0,0)
/// - 1 = (1,0,0)
/// - 2 = (0,1,0)
/// - 3 = (1,1,0)
/// - 4 = (0,0,1)
/// - 5 = (1,0,1)
/// - 6 = (0,1,1)
/// - 7 = (1,1,1)
pub const EDGE_CORNERS: [[u8; 2]; 12] = [
  [0, 1], // Edge 0:  X axis at Y=0, Z=0
  [0, 2], // Edge 1:  Y axis at X=0, Z=0
  [0, 4], // Edge 2:  Z axis at X=0, Y=0
  [1, 3], // Edge 3:  Y axis at X=1, Z=0
  [1, 5], // Edge 4:  Z axis at X=1, Y=0
  [2, 3], // Edge 5:  X axis at Y=1, Z=0
  [2, 6], // Edge 6:  Z axis at X=0, Y=1
  [3, 7], // Edge 7:  Z axis at X=1, Y=1
  [4, 5], // Edge 8:  X axis at Y=0, Z=1
  [4, 6], // Edge 9:  Y axis at X=0, Z=1
  [5, 7], // Edge 10: Y axis at X=1, Z=1
  [6, 7], // Edge 11: X axis at Y=1, Z=1
];

/// Face corners, counter-clockwise when viewed from outside the cell.
pub const FACE_CORNERS: [[u8; 4]; 6] = [
  [0, 4, 6, 2], // -X
  [1, 3, 7, 5], // +X
  [0, 1, 5, 4], // -Y
  [2, 6, 7, 3], // +Y
  [0, 2, 3, 1], // -Z
  [4, 5, 7, 6], // +Z
];

/// Triangulation shared by every case code of one equivalence class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegularCellData {
  /// High nibble: vertex count. Low nibble: triangle count.
  pub geometry_counts: u8,
  /// Local vertex slots, 3 per triangle.
  pub vertex_index: [u8; MAX_CELL_TRIANGLES * 3],
}

impl RegularCellData {
  const EMPTY: Self = Self {
    geometry_counts: 0,
    vertex_index: [0; MAX_CELL_TRIANGLES * 3],
  };

  #[inline]
  pub const fn vertex_count(&self) -> usize {
    (self.geometry_counts >> 4) as usize
  }

  #[inline]
  pub const fn triangle_count(&self) -> usize {
    (self.geometry_counts & 0x0F) as usize
  }

  /// Triangle slot indices in table order (winding preserved).
  #[inline]
  pub fn indices(&self) -> &[u8] {
    &self.vertex_index[..self.triangle_count() * 3]
  }
}

/// One entry of [`REGULAR_VERTEX_DATA`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegularVertex(pub u16);

impl RegularVertex {
  /// Lower corner of the edge.
  #[inline]
  pub const fn corner0(self) -> u8 {
    ((self.0 >> 4) & 0x0F) as u8
  }

  /// Upper corner of the edge.
  #[inline]
  pub const fn corner1(self) -> u8 {
    (self.0 & 0x0F) as u8
  }

  /// Slot of this vertex in the owning cell.
  #[inline]
  pub const fn reuse_slot(self) -> u8 {
    ((self.0 >> 8) & 0x0F) as u8
  }

  /// Direction bits of the owning cell (0 when owned by this cell).
  #[inline]
  pub const fn reuse_direction(self) -> u8 {
    ((self.0 >> 12) & 0x07) as u8
  }

  /// The vertex is created by this cell and published for later cells.
  #[inline]
  pub const fn creates_reusable(self) -> bool {
    (self.0 >> 12) as u8 & REUSE_NEW_VERTEX != 0
  }
}

/// Case code → equivalence class index.
pub static REGULAR_CELL_CLASS: [u8; 256] = TABLES.class;

/// Equivalence class → triangulation.
pub static REGULAR_CELL_DATA: [RegularCellData; REGULAR_CLASS_COUNT] = TABLES.data;

/// Case code → per-vertex edge and reuse encoding.
pub static REGULAR_VERTEX_DATA: [[u16; MAX_CELL_VERTICES]; 256] = TABLES.vertex;

/// Table entry for one case code.
#[derive(Clone, Copy, Debug)]
pub struct CaseEntry {
  pub case_code: CaseCode,
  pub class_index: u8,
  pub cell: &'static RegularCellData,
  pub vertices: &'static [u16; MAX_CELL_VERTICES],
}

impl CaseEntry {
  /// Decoded vertex encoding for a local slot.
  #[inline]
  pub fn vertex(&self, slot: usize) -> RegularVertex {
    RegularVertex(self.vertices[slot])
  }
}

/// Read-only access to the regular cell tables.
pub struct CaseTables;

impl CaseTables {
  /// Look up the equivalence class and vertex encodings of a case code.
  pub fn lookup(case_code: CaseCode) -> Result<CaseEntry, MeshError> {
    let class_index = REGULAR_CELL_CLASS[case_code as usize];
    let cell = REGULAR_CELL_DATA
      .get(class_index as usize)
      .ok_or(MeshError::MissingCase { case_code })?;
    Ok(CaseEntry {
      case_code,
      class_index,
      cell,
      vertices: &REGULAR_VERTEX_DATA[case_code as usize],
    })
  }
}

// =============================================================================
// Compile-time generation
// =============================================================================

const NO_EDGE: u8 = u8::MAX;

struct RegularTables {
  class: [u8; 256],
  data: [RegularCellData; REGULAR_CLASS_COUNT],
  vertex: [[u16; MAX_CELL_VERTICES]; 256],
}

/// Triangulation of one case before deduplication.
#[derive(Clone, Copy)]
struct CaseShape {
  edges: [u8; MAX_CELL_VERTICES],
  vertex_count: u8,
  indices: [u8; MAX_CELL_TRIANGLES * 3],
  triangle_count: u8,
}

#[allow(long_running_const_eval)]
const TABLES: RegularTables = build_regular_tables();

#[inline(always)]
const fn is_inside(case_code: usize, corner: u8) -> bool {
  (case_code >> corner) & 1 == 1
}

const fn edge_between(a: u8, b: u8) -> usize {
  let (lo, hi) = if a < b { (a, b) } else { (b, a) };
  let mut edge = 0;
  while edge < 12 {
    if EDGE_CORNERS[edge][0] == lo && EDGE_CORNERS[edge][1] == hi {
      return edge;
    }
    edge += 1;
  }
  panic!("corners are not adjacent");
}

/// For every crossing edge, the next crossing edge along the surface loop.
const fn surface_successors(case_code: usize) -> [u8; 12] {
  let mut next = [NO_EDGE; 12];
  let mut face = 0;
  while face < 6 {
    let corners = FACE_CORNERS[face];
    let mut k = 0;
    while k < 4 {
      let a = corners[k];
      let b = corners[(k + 1) % 4];
      // Edge entering the inside region
      if !is_inside(case_code, a) && is_inside(case_code, b) {
        let mut j = 1;
        while j < 4 {
          let c = corners[(k + j) % 4];
          let d = corners[(k + j + 1) % 4];
          // First edge leaving it again
          if is_inside(case_code, c) && !is_inside(case_code, d) {
            next[edge_between(a, b)] = edge_between(c, d) as u8;
            break;
          }
          j += 1;
        }
      }
      k += 1;
    }
    face += 1;
  }
  next
}

/// Both corners of `edge` belong to `face`.
const fn edge_on_face(edge: u8, face: usize) -> bool {
  let corners = FACE_CORNERS[face];
  let [a, b] = EDGE_CORNERS[edge as usize];
  let mut has_a = false;
  let mut has_b = false;
  let mut k = 0;
  while k < 4 {
    if corners[k] == a {
      has_a = true;
    }
    if corners[k] == b {
      has_b = true;
    }
    k += 1;
  }
  has_a && has_b
}

/// Triangle over three crossing edges that all lie in one cell face.
const fn lies_in_face(a: u8, b: u8, c: u8) -> bool {
  let mut face = 0;
  while face < 6 {
    if edge_on_face(a, face) && edge_on_face(b, face) && edge_on_face(c, face) {
      return true;
    }
    face += 1;
  }
  false
}

/// First loop position whose fan has no triangle in a cell face. The cell
/// across that face would emit the same triangle reversed.
const fn fan_apex(cycle: &[u8; MAX_CELL_VERTICES], len: usize) -> usize {
  let mut apex = 0;
  while apex < len {
    let mut k = 1;
    while k + 1 < len {
      let b = cycle[(apex + k) % len];
      let c = cycle[(apex + k + 1) % len];
      if lies_in_face(cycle[apex], b, c) {
        break;
      }
      k += 1;
    }
    if k + 1 >= len {
      return apex;
    }
    apex += 1;
  }
  panic!("surface loop has no valid fan apex");
}

const fn trace_case(case_code: usize) -> CaseShape {
  let next = surface_successors(case_code);
  let mut visited = [false; 12];
  let mut shape = CaseShape {
    edges: [NO_EDGE; MAX_CELL_VERTICES],
    vertex_count: 0,
    indices: [0; MAX_CELL_TRIANGLES * 3],
    triangle_count: 0,
  };

  let mut start = 0;
  while start < 12 {
    let c0 = EDGE_CORNERS[start][0];
    let c1 = EDGE_CORNERS[start][1];
    let crossing = is_inside(case_code, c0) != is_inside(case_code, c1);

    if crossing && !visited[start] {
      let mut cycle = [NO_EDGE; MAX_CELL_VERTICES];
      let mut len = 0;
      let mut edge = start;
      while !visited[edge] {
        visited[edge] = true;
        cycle[len] = edge as u8;
        len += 1;
        edge = next[edge] as usize;
      }

      let apex = fan_apex(&cycle, len);
      let first = shape.vertex_count;
      let mut k = 0;
      while k < len {
        let slot = shape.vertex_count;
        shape.edges[slot as usize] = cycle[(apex + k) % len];
        shape.vertex_count += 1;

        if slot >= first + 2 {
          let base = shape.triangle_count as usize * 3;
          shape.indices[base] = first;
          shape.indices[base + 1] = slot - 1;
          shape.indices[base + 2] = slot;
          shape.triangle_count += 1;
        }
        k += 1;
      }
    }
    start += 1;
  }

  shape
}

/// Encode the edge/reuse word for the vertex on `edge`.
const fn vertex_code(edge: u8) -> u16 {
  let c0 = EDGE_CORNERS[edge as usize][0];
  let c1 = EDGE_CORNERS[edge as usize][1];
  let slot: u16 = match c0 ^ c1 {
    1 => 2, // x edge
    2 => 1, // y edge
    _ => 3, // z edge
  };
  let direction = if c1 == OWNED_CORNER {
    REUSE_NEW_VERTEX
  } else {
    !c1 & 0x07
  };
  ((direction as u16) << 12) | (slot << 8) | ((c0 as u16) << 4) | c1 as u16
}

const fn same_cell_data(a: &RegularCellData, b: &RegularCellData) -> bool {
  if a.geometry_counts != b.geometry_counts {
    return false;
  }
  let mut i = 0;
  while i < MAX_CELL_TRIANGLES * 3 {
    if a.vertex_index[i] != b.vertex_index[i] {
      return false;
    }
    i += 1;
  }
  true
}

const fn build_regular_tables() -> RegularTables {
  let mut tables = RegularTables {
    class: [0; 256],
    data: [RegularCellData::EMPTY; REGULAR_CLASS_COUNT],
    vertex: [[0; MAX_CELL_VERTICES]; 256],
  };
  let mut class_count = 0;

  let mut case_code = 0;
  while case_code < 256 {
    let shape = trace_case(case_code);
    let data = RegularCellData {
      geometry_counts: (shape.vertex_count << 4) | shape.triangle_count,
      vertex_index: shape.indices,
    };

    let mut class = 0;
    while class < class_count && !same_cell_data(&tables.data[class], &data) {
      class += 1;
    }
    if class == class_count {
      tables.data[class] = data;
      class_count += 1;
    }
    tables.class[case_code] = class as u8;

    let mut slot = 0;
    while slot < shape.vertex_count as usize {
      tables.vertex[case_code][slot] = vertex_code(shape.edges[slot]);
      slot += 1;
    }

    case_code += 1;
  }

  assert!(class_count == REGULAR_CLASS_COUNT);
  tables
}

#[cfg(test)]
#[path = "case_tables_test.rs"]
mod case_tables_test;
