//! Scalar field sources sampled into voxel grids.

use glam::Vec3;

/// Signed scalar field evaluated at world positions.
///
/// Negative values are inside the surface, non-negative values are outside.
/// Implementations must be pure: the same position always returns the same
/// value, which is what makes meshing deterministic.
pub trait ScalarField: Send + Sync {
  /// Signed distance (or any signed density) at `position`.
  fn distance(&self, position: Vec3) -> f32;
}

impl<F> ScalarField for F
where
  F: Fn(Vec3) -> f32 + Send + Sync,
{
  #[inline]
  fn distance(&self, position: Vec3) -> f32 {
    self(position)
  }
}
