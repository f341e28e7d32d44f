//! Lattice, direction and fixed-point constants for regular cell meshing.
//!
//! # Grid Layout
//!
//! A chunk is sampled on `size³` lattice points and produces `(size - 1)³`
//! cells. Samples are stored X-fastest so that the storage order matches the
//! cell traversal order:
//!
//! ```text
//! index = x + z * size + y * size * size
//!
//! Traversal: X innermost, then Z, then Y (outermost)
//! ```
//!
//! # Coordinate System
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          │
//!          └───────── +X
//!         /
//!        /
//!       +Z
//!
//! Cell corner indices (binary: ZYX):
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```
//!
//! # Reuse Directions
//!
//! A cell owns the three edges that end at its maximal corner (7) plus that
//! corner itself. Every other edge belongs to a preceding cell, reached by
//! subtracting one along each axis whose direction bit is set:
//!
//! ```text
//! bit 0 (0x1): x - 1
//! bit 1 (0x2): y - 1
//! bit 2 (0x4): z - 1
//! bit 3 (0x8): vertex is created here and may be reused later
//! ```

/// Default number of samples per axis.
pub const DEFAULT_GRID_SIZE: usize = 32;

/// Smallest grid that still contains one cell.
pub const MIN_GRID_SIZE: usize = 2;

/// Largest grid accepted. Keeps fixed-point lattice math inside `i32`.
pub const MAX_GRID_SIZE: usize = 1024;

/// Lattice offsets for the 8 cube corners relative to the cell position.
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
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
  [0, 0, 0],
  [1, 0, 0],
  [0, 1, 0],
  [1, 1, 0],
  [0, 0, 1],
  [1, 0, 1],
  [0, 1, 1],
  [1, 1, 1],
];

/// Corner every cell owns. Edges ending here create new vertices.
pub const OWNED_CORNER: u8 = 7;

/// Direction bit: neighbor at x - 1.
pub const DIRECTION_X: u8 = 0x1;

/// Direction bit: neighbor at y - 1.
pub const DIRECTION_Y: u8 = 0x2;

/// Direction bit: neighbor at z - 1.
pub const DIRECTION_Z: u8 = 0x4;

/// All three axis direction bits.
pub const DIRECTION_MASK_ALL: u8 = DIRECTION_X | DIRECTION_Y | DIRECTION_Z;

/// Reuse nibble flag: the vertex is new and owned by the current cell.
pub const REUSE_NEW_VERTEX: u8 = 0x8;

/// Vertex slots a cell can publish for reuse (corner 7 + 3 owned edges).
pub const REUSE_SLOTS: usize = 4;

/// Reuse slot of a vertex lying exactly on corner 7.
pub const CORNER_REUSE_SLOT: u8 = 0;

/// Fractional bits of the interpolation parameter.
pub const FIXED_POINT_SHIFT: u32 = 8;

/// Fixed-point representation of 1.0 for the interpolation parameter.
pub const FIXED_POINT_ONE: i32 = 1 << FIXED_POINT_SHIFT;

/// Fixed-point midpoint, used when an edge has no usable crossing.
pub const FIXED_POINT_HALF: i32 = FIXED_POINT_ONE / 2;

/// Lattice offset of a corner as signed integers.
#[inline(always)]
pub const fn corner_offset(corner: u8) -> [i32; 3] {
  [
    (corner & 1) as i32,
    ((corner >> 1) & 1) as i32,
    ((corner >> 2) & 1) as i32,
  ]
}

/// Number of cells a grid of `size` samples per axis produces per axis.
#[inline(always)]
pub const fn cells_per_axis(size: usize) -> usize {
  size.saturating_sub(1)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
