//! Simple SDF fields for testing and debugging.
//!
//! These fields are deterministic mathematical SDFs that are easy to verify
//! visually and analytically. Use them to exercise the mesher without a noise
//! generator.

use glam::Vec3;

use crate::field::ScalarField;

/// Field with the same value everywhere.
///
/// A negative value fills the chunk (all inside), a positive value empties it.
#[derive(Clone, Copy, Debug)]
pub struct ConstantField {
  pub value: f32,
}

impl ConstantField {
  pub fn new(value: f32) -> Self {
    Self { value }
  }
}

impl ScalarField for ConstantField {
  #[inline]
  fn distance(&self, _position: Vec3) -> f32 {
    self.value
  }
}

/// Horizontal plane sampler (ground plane).
///
/// Simple flat plane at a given height. Good baseline test.
/// SDF: `y - height` (positive above, negative below)
#[derive(Clone, Copy, Debug, Default)]
pub struct GroundPlaneSampler {
  /// Height of the ground plane
  pub height: f32,
}

impl GroundPlaneSampler {
  pub fn new(height: f32) -> Self {
    Self { height }
  }
}

impl ScalarField for GroundPlaneSampler {
  #[inline]
  fn distance(&self, position: Vec3) -> f32 {
    position.y - self.height
  }
}

/// Tilted plane SDF sampler.
///
/// Creates a plane tilted around the Z axis. Useful for testing chunk
/// boundary alignment since the surface crosses many cells at a predictable
/// angle.
///
/// SDF: `(y - height) * cos(angle) - x * sin(angle)`
/// Default: plane tilted 45° passing through y=0
#[derive(Clone, Copy, Debug)]
pub struct TiltedPlaneSampler {
  /// Height offset of the plane (default: 0.0)
  pub height: f32,
  /// Tilt angle in radians (default: π/4 = 45°)
  pub angle: f32,
}

impl Default for TiltedPlaneSampler {
  fn default() -> Self {
    Self {
      height: 0.0,
      angle: std::f32::consts::FRAC_PI_4,
    }
  }
}

impl TiltedPlaneSampler {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_height(mut self, height: f32) -> Self {
    self.height = height;
    self
  }

  pub fn with_angle_degrees(mut self, degrees: f32) -> Self {
    self.angle = degrees.to_radians();
    self
  }
}

impl ScalarField for TiltedPlaneSampler {
  #[inline]
  fn distance(&self, position: Vec3) -> f32 {
    // Plane normal = (-sin(angle), cos(angle), 0)
    (position.y - self.height) * self.angle.cos() - position.x * self.angle.sin()
  }
}

/// Sphere SDF sampler.
///
/// SDF: `|p - center| - radius`
#[derive(Clone, Copy, Debug)]
pub struct SphereSampler {
  /// Center of the sphere in world coordinates
  pub center: Vec3,
  /// Radius of the sphere
  pub radius: f32,
}

impl Default for SphereSampler {
  fn default() -> Self {
    Self {
      center: Vec3::ZERO,
      radius: 20.0,
    }
  }
}

impl SphereSampler {
  pub fn new(radius: f32) -> Self {
    Self {
      center: Vec3::ZERO,
      radius,
    }
  }

  pub fn with_center(mut self, center: Vec3) -> Self {
    self.center = center;
    self
  }
}

impl ScalarField for SphereSampler {
  #[inline]
  fn distance(&self, position: Vec3) -> f32 {
    (position - self.center).length() - self.radius
  }
}

/// Box SDF sampler.
///
/// Axis-aligned box with the given half extents.
#[derive(Clone, Copy, Debug)]
pub struct BoxSampler {
  /// Center of the box
  pub center: Vec3,
  /// Half-extents (half-size in each dimension)
  pub half_extents: Vec3,
}

impl Default for BoxSampler {
  fn default() -> Self {
    Self {
      center: Vec3::ZERO,
      half_extents: Vec3::splat(10.0),
    }
  }
}

impl BoxSampler {
  pub fn new(half_extents: Vec3) -> Self {
    Self {
      center: Vec3::ZERO,
      half_extents,
    }
  }

  pub fn with_center(mut self, center: Vec3) -> Self {
    self.center = center;
    self
  }
}

impl ScalarField for BoxSampler {
  #[inline]
  fn distance(&self, position: Vec3) -> f32 {
    let d = (position - self.center).abs() - self.half_extents;
    let outside = d.max(Vec3::ZERO).length();
    let inside = d.max_element().min(0.0);
    outside + inside
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn constant_field_is_uniform() {
    let field = ConstantField::new(-1.0);
    assert_eq!(field.distance(Vec3::ZERO), -1.0);
    assert_eq!(field.distance(Vec3::new(100.0, -3.0, 7.0)), -1.0);
  }

  #[test]
  fn tilted_plane_crosses_origin() {
    let field = TiltedPlaneSampler::default();
    assert!(field.distance(Vec3::ZERO).abs() < 1e-6);
    assert!(field.distance(Vec3::new(0.0, 1.0, 0.0)) > 0.0);
    assert!(field.distance(Vec3::new(0.0, -1.0, 0.0)) < 0.0);
  }

  #[test]
  fn sphere_signs() {
    let field = SphereSampler::new(10.0).with_center(Vec3::splat(16.0));
    assert!(field.distance(Vec3::splat(16.0)) < 0.0);
    assert!(field.distance(Vec3::ZERO) > 0.0);
    assert!((field.distance(Vec3::new(26.0, 16.0, 16.0))).abs() < 1e-5);
  }

  #[test]
  fn ground_plane_splits_space() {
    let field = GroundPlaneSampler::new(16.0);
    assert!(field.distance(Vec3::new(0.0, 20.0, 0.0)) > 0.0);
    assert!(field.distance(Vec3::new(0.0, 10.0, 0.0)) < 0.0);
  }

  #[test]
  fn box_distance() {
    let field = BoxSampler::new(Vec3::splat(2.0));
    assert_eq!(field.distance(Vec3::ZERO), -2.0);
    assert!((field.distance(Vec3::new(3.0, 0.0, 0.0)) - 1.0).abs() < 1e-6);
    assert!((field.distance(Vec3::new(3.0, 3.0, 0.0)) - 2.0f32.sqrt()).abs() < 1e-6);
  }
}
