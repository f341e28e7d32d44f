use super::*;
use crate::types::Vertex;

fn approx_eq(a: [f32; 3], b: [f32; 3], epsilon: f32) -> bool {
  (a[0] - b[0]).abs() < epsilon && (a[1] - b[1]).abs() < epsilon && (a[2] - b[2]).abs() < epsilon
}

#[test]
fn test_gradient_flat_x() {
  // All negative on left, all positive on right
  let samples = [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0];
  assert!(approx_eq(gradient(&samples), [1.0, 0.0, 0.0], 0.01));
}

#[test]
fn test_gradient_flat_y() {
  // Bottom negative, top positive
  let samples = [-1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0];
  assert!(approx_eq(gradient(&samples), [0.0, 1.0, 0.0], 0.01));
}

#[test]
fn test_gradient_flat_z() {
  let samples = [-1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0];
  assert!(approx_eq(gradient(&samples), [0.0, 0.0, 1.0], 0.01));
}

#[test]
fn test_gradient_degenerate() {
  assert_eq!(gradient(&[0.0; 8]), [0.0, 1.0, 0.0]);
  assert_eq!(gradient(&[3.0; 8]), [0.0, 1.0, 0.0]);
}

#[test]
fn test_gradient_at_corner_uses_adjacent_edges() {
  let samples = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
  // At corner 0 the trilinear gradient is (s1-s0, s2-s0, s4-s0) = (1, 2, 4)
  let len = (1.0f32 + 4.0 + 16.0).sqrt();
  let expected = [1.0 / len, 2.0 / len, 4.0 / len];
  assert!(approx_eq(gradient_at(&samples, [0.0, 0.0, 0.0]), expected, 1e-5));
}

#[test]
fn test_gradient_at_varies_with_position() {
  // Saddle: x gradient flips sign between the y=0 and y=1 faces
  let samples = [-1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0];
  let bottom = gradient_at(&samples, [0.5, 0.0, 0.5]);
  let top = gradient_at(&samples, [0.5, 1.0, 0.5]);
  assert!(bottom[0] > 0.9, "bottom: {bottom:?}");
  assert!(top[0] < -0.9, "top: {top:?}");
}

#[test]
fn test_geometry_normals_single_triangle() {
  let mut output = MeshOutput::new();
  for position in [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]] {
    output.vertices.push(Vertex {
      position,
      ..Default::default()
    });
  }
  output.indices = vec![0, 1, 2];

  recalculate_from_geometry(&mut output);

  // (0,0,1) x (1,0,0) = (0,1,0)
  for vertex in &output.vertices {
    assert!(approx_eq(vertex.normal, [0.0, 1.0, 0.0], 1e-6));
  }
}

#[test]
fn test_geometry_normals_ignore_degenerate_triangles() {
  let mut output = MeshOutput::new();
  for position in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]] {
    output.vertices.push(Vertex {
      position,
      normal: [9.0, 9.0, 9.0],
      ..Default::default()
    });
  }
  output.indices = vec![0, 1, 2];

  recalculate_from_geometry(&mut output);

  for vertex in &output.vertices {
    assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
  }
}

#[test]
fn test_geometry_normals_are_unit_length() {
  // Two triangles folded along the x axis
  let mut output = MeshOutput::new();
  for position in [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, -1.0],
  ] {
    output.vertices.push(Vertex {
      position,
      ..Default::default()
    });
  }
  output.indices = vec![0, 2, 1, 0, 1, 3];

  recalculate_from_geometry(&mut output);

  for vertex in &output.vertices {
    let n = Vec3A::from_array(vertex.normal);
    assert!((n.length() - 1.0).abs() < 1e-5);
  }
}
