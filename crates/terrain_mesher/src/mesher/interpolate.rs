//! Fixed-point edge interpolation.
//!
//! The crossing parameter `t` has 8 fractional bits:
//!
//! ```text
//! t = (d1 << 8) / (d1 - d0)          t ∈ [0, 256]
//! p = (p0 * t + p1 * (256 - t)) / 256
//! ```
//!
//! `t = 256` lands on corner c0, `t = 0` on corner c1. Both only happen when
//! an endpoint sample is exactly zero.

use crate::constants::{corner_offset, FIXED_POINT_HALF, FIXED_POINT_ONE, FIXED_POINT_SHIFT};
use crate::types::SdfSample;

/// Fixed-point crossing parameter between corner samples `d0` and `d1`.
///
/// Equal samples have no crossing; the midpoint is returned instead of
/// dividing by zero.
#[inline]
pub fn crossing_parameter(d0: SdfSample, d1: SdfSample) -> i32 {
  let d0 = d0 as i32;
  let d1 = d1 as i32;
  if d1 == d0 {
    return FIXED_POINT_HALF;
  }
  (d1 << FIXED_POINT_SHIFT) / (d1 - d0)
}

/// True when `t` has no fractional part, i.e. the vertex sits on a corner.
#[inline]
pub fn lands_on_corner(t: i32) -> bool {
  t & (FIXED_POINT_ONE - 1) == 0
}

/// Interpolated lattice position in fixed point (lattice units × 256).
#[inline]
pub fn lattice_position(cell: [usize; 3], c0: u8, c1: u8, t: i32) -> [i32; 3] {
  let o0 = corner_offset(c0);
  let o1 = corner_offset(c1);
  std::array::from_fn(|axis| {
    let base = cell[axis] as i32;
    (base + o0[axis]) * t + (base + o1[axis]) * (FIXED_POINT_ONE - t)
  })
}

/// Convert a fixed-point lattice position to world space.
#[inline]
pub fn world_position(fixed: [i32; 3], origin: [f32; 3], voxel_size: f32) -> [f32; 3] {
  std::array::from_fn(|axis| {
    origin[axis] + fixed[axis] as f32 / FIXED_POINT_ONE as f32 * voxel_size
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_crossing_parameter() {
    // Surface halfway between -64 and +64
    assert_eq!(crossing_parameter(-64, 64), 128);
    // Close to c1 when |d1| is small
    assert_eq!(crossing_parameter(-100, 10), (10 << 8) / 110);
    assert!(crossing_parameter(-100, 10) < 128);
    // Truncates toward zero
    assert_eq!(crossing_parameter(3, -1), 64);
    assert_eq!(crossing_parameter(-2, 1), 85);
  }

  #[test]
  fn test_crossing_parameter_equal_samples() {
    assert_eq!(crossing_parameter(5, 5), FIXED_POINT_HALF);
    assert_eq!(crossing_parameter(0, 0), FIXED_POINT_HALF);
  }

  #[test]
  fn test_crossing_on_corner() {
    assert_eq!(crossing_parameter(-10, 0), 0);
    assert_eq!(crossing_parameter(0, -10), 256);
    assert!(lands_on_corner(0));
    assert!(lands_on_corner(256));
    assert!(!lands_on_corner(128));
  }

  #[test]
  fn test_strictly_between_for_opposite_signs() {
    for d0 in [-128i8, -64, -1] {
      for d1 in [1i8, 64, 127] {
        let t = crossing_parameter(d0, d1);
        assert!(t > 0 && t < 256, "d0={d0} d1={d1} t={t}");
        let t = crossing_parameter(d1, d0);
        assert!(t > 0 && t < 256, "d0={d1} d1={d0} t={t}");
      }
    }
  }

  #[test]
  fn test_lattice_position() {
    // X edge of cell (2, 3, 4) at t = 64: a quarter of the way from c0 is
    // three quarters toward c1
    let p = lattice_position([2, 3, 4], 0, 1, 64);
    assert_eq!(p, [2 * 64 + 3 * 192, 3 * 256, 4 * 256]);
    assert_eq!(world_position(p, [0.0; 3], 1.0), [2.75, 3.0, 4.0]);
  }

  #[test]
  fn test_world_position() {
    let p = lattice_position([0, 0, 0], 3, 7, 128);
    assert_eq!(world_position(p, [10.0, 0.0, -4.0], 2.0), [12.0, 2.0, -3.0]);
  }
}
