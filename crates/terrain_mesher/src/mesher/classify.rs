//! Cell classification.
//!
//! The case code is an 8-bit value where each bit indicates whether a corner
//! of the 2x2x2 cell is inside the surface (negative SDF value). The direction
//! mask tells which preceding neighbor cells exist inside the chunk.

use crate::constants::{DIRECTION_X, DIRECTION_Y, DIRECTION_Z};
use crate::types::{BoundaryPolicy, CaseCode, DirectionMask, SdfSample};

/// Result of classifying one cell under a [`BoundaryPolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
  /// Corner signs packed into a case code.
  Valid(CaseCode),

  /// A corner sample is exactly 0 and the policy rejects it.
  DegenerateSample { corner: u8 },
}

/// Pack the sign bit of each corner sample into a case code.
///
/// Each bit in the result corresponds to one corner:
/// - Bit 0: corner (0,0,0)
/// - Bit 1: corner (1,0,0)
/// - Bit 2: corner (0,1,0)
/// - Bit 3: corner (1,1,0)
/// - Bit 4: corner (0,0,1)
/// - Bit 5: corner (1,0,1)
/// - Bit 6: corner (0,1,1)
/// - Bit 7: corner (1,1,1)
///
/// A bit is set if the corresponding sample is negative (inside surface).
#[inline]
pub fn case_code(corners: &[SdfSample; 8]) -> CaseCode {
  corners
    .iter()
    .enumerate()
    .fold(0, |code, (i, &sample)| code | (((sample as u8) >> 7) << i))
}

/// Classify a cell, applying the boundary policy to zero samples.
#[inline]
pub fn classify(corners: &[SdfSample; 8], policy: BoundaryPolicy) -> Classification {
  if policy == BoundaryPolicy::Reject {
    if let Some(corner) = corners.iter().position(|&s| s == 0) {
      return Classification::DegenerateSample {
        corner: corner as u8,
      };
    }
  }
  Classification::Valid(case_code(corners))
}

/// Direction mask of a cell position: bit k is set iff axis k is > 0.
#[inline]
pub fn direction_mask(cell: [usize; 3]) -> DirectionMask {
  let [x, y, z] = cell;
  let mut mask = 0;
  if x > 0 {
    mask |= DIRECTION_X;
  }
  if y > 0 {
    mask |= DIRECTION_Y;
  }
  if z > 0 {
    mask |= DIRECTION_Z;
  }
  mask
}

/// True when all corners share corner 7's sign, so the cell has no geometry.
#[inline]
pub fn is_empty(case_code: CaseCode, corners: &[SdfSample; 8]) -> bool {
  // Arithmetic shift replicates the sign bit of corner 7 across the byte
  (case_code ^ ((corners[7] >> 7) as u8)) == 0
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
