use std::collections::HashSet;

use glam::Vec3;

use super::*;
use crate::constants::{corner_offset, DIRECTION_MASK_ALL};

fn crossing_edges(case_code: usize) -> HashSet<u8> {
  (0..12u8)
    .filter(|&e| {
      let [c0, c1] = EDGE_CORNERS[e as usize];
      is_inside(case_code, c0) != is_inside(case_code, c1)
    })
    .collect()
}

fn edge_of(code: u16) -> u8 {
  let v = RegularVertex(code);
  edge_between(v.corner0(), v.corner1()) as u8
}

fn edge_midpoint(code: u16) -> Vec3 {
  let v = RegularVertex(code);
  let a = Vec3::from_array(corner_offset(v.corner0()).map(|c| c as f32));
  let b = Vec3::from_array(corner_offset(v.corner1()).map(|c| c as f32));
  (a + b) * 0.5
}

/// Trilinear blend of -1 (inside) and +1 (outside) corner values.
fn trilinear_sign_field(case_code: usize, p: Vec3) -> f32 {
  (0..8u8)
    .map(|corner| {
      let [ox, oy, oz] = corner_offset(corner);
      let wx = if ox == 1 { p.x } else { 1.0 - p.x };
      let wy = if oy == 1 { p.y } else { 1.0 - p.y };
      let wz = if oz == 1 { p.z } else { 1.0 - p.z };
      let value = if is_inside(case_code, corner) { -1.0 } else { 1.0 };
      wx * wy * wz * value
    })
    .sum()
}

#[test]
fn test_edges_match_corner_offsets() {
  for [c0, c1] in EDGE_CORNERS {
    assert!(c0 < c1);
    // Adjacent corners differ in exactly one axis bit
    assert_eq!((c0 ^ c1).count_ones(), 1);
  }
}

#[test]
fn test_every_case_has_a_class() {
  for case_code in 0..=255u8 {
    let entry = CaseTables::lookup(case_code).unwrap();
    assert!((entry.class_index as usize) < REGULAR_CLASS_COUNT);
  }
}

#[test]
fn test_all_classes_are_used() {
  let used: HashSet<u8> = REGULAR_CELL_CLASS.iter().copied().collect();
  assert_eq!(used.len(), REGULAR_CLASS_COUNT);
}

#[test]
fn test_uniform_cases_are_empty() {
  for case_code in [0x00u8, 0xFF] {
    let entry = CaseTables::lookup(case_code).unwrap();
    assert_eq!(entry.cell.vertex_count(), 0);
    assert_eq!(entry.cell.triangle_count(), 0);
    assert!(entry.cell.indices().is_empty());
  }
}

#[test]
fn test_single_corner_class() {
  for corner in 0..8 {
    let entry = CaseTables::lookup(1 << corner).unwrap();
    assert_eq!(entry.cell.vertex_count(), 3);
    assert_eq!(entry.cell.triangle_count(), 1);
  }
}

#[test]
fn test_case_one_vertex_codes() {
  let entry = CaseTables::lookup(0x01).unwrap();
  assert_eq!(&entry.vertices[..3], &[0x6201, 0x5102, 0x3304]);
}

#[test]
fn test_geometry_limits() {
  for data in REGULAR_CELL_DATA.iter() {
    assert!(data.vertex_count() <= MAX_CELL_VERTICES);
    assert!(data.triangle_count() <= MAX_CELL_TRIANGLES);
    for &slot in data.indices() {
      assert!((slot as usize) < data.vertex_count());
    }
  }
}

#[test]
fn test_vertices_cover_crossing_edges_once() {
  for case_code in 0..256usize {
    let entry = CaseTables::lookup(case_code as u8).unwrap();
    let count = entry.cell.vertex_count();
    let edges: Vec<u8> = entry.vertices[..count].iter().map(|&v| edge_of(v)).collect();
    let unique: HashSet<u8> = edges.iter().copied().collect();

    assert_eq!(unique.len(), edges.len(), "case {case_code:#04x} repeats an edge");
    assert_eq!(unique, crossing_edges(case_code), "case {case_code:#04x}");
    assert!(entry.vertices[count..].iter().all(|&v| v == 0));
  }
}

#[test]
fn test_complementary_cases_share_edges() {
  for case_code in 0..256usize {
    let a = CaseTables::lookup(case_code as u8).unwrap();
    let b = CaseTables::lookup(!(case_code as u8)).unwrap();
    assert_eq!(a.cell.vertex_count(), b.cell.vertex_count());
    assert_eq!(crossing_edges(case_code), crossing_edges(255 - case_code));
  }
}

#[test]
fn test_triangles_face_outside() {
  for case_code in 1..255usize {
    let entry = CaseTables::lookup(case_code as u8).unwrap();
    for tri in entry.cell.indices().chunks_exact(3) {
      let p: Vec<Vec3> = tri
        .iter()
        .map(|&slot| edge_midpoint(entry.vertices[slot as usize]))
        .collect();
      let normal = (p[1] - p[0]).cross(p[2] - p[0]);
      if normal.length_squared() < 1e-8 {
        continue;
      }
      let n = normal.normalize() * 0.01;
      let centroid = (p[0] + p[1] + p[2]) / 3.0;
      assert!(
        trilinear_sign_field(case_code, centroid + n) > trilinear_sign_field(case_code, centroid - n),
        "case {case_code:#04x} has an inward facing triangle"
      );
    }
  }
}

#[test]
fn test_no_triangle_lies_in_a_cell_face() {
  for case_code in 1..255usize {
    let entry = CaseTables::lookup(case_code as u8).unwrap();
    for tri in entry.cell.indices().chunks_exact(3) {
      let p: Vec<Vec3> = tri
        .iter()
        .map(|&slot| edge_midpoint(entry.vertices[slot as usize]))
        .collect();
      for axis in 0..3 {
        for side in [0.0, 1.0] {
          assert!(
            !p.iter().all(|v| v[axis] == side),
            "case {case_code:#04x} has a triangle in face axis {axis} = {side}"
          );
        }
      }
    }
  }
}

#[test]
fn test_fan_apex_skips_face_triangles() {
  // Case 0x5e: edges 0, 4 and 8 sit on the -Y face, so the loop cannot be
  // fanned from its lowest edge
  let shape = trace_case(0x5e);
  let edges = &shape.edges[..shape.vertex_count as usize];
  assert_eq!(edges.len(), 7);
  assert_ne!(edges[0], 0);
  for tri in shape.indices[..shape.triangle_count as usize * 3].chunks_exact(3) {
    let [a, b, c] = [0, 1, 2].map(|k| shape.edges[tri[k] as usize]);
    assert!(!lies_in_face(a, b, c));
  }
}

#[test]
fn test_reuse_encoding() {
  for case_code in 0..256usize {
    let entry = CaseTables::lookup(case_code as u8).unwrap();
    for slot in 0..entry.cell.vertex_count() {
      let v = entry.vertex(slot);
      if v.corner1() == OWNED_CORNER {
        assert!(v.creates_reusable());
        assert_eq!(v.reuse_direction(), 0);
      } else {
        assert!(!v.creates_reusable());
        // Owner lies behind along every axis where corner1 sits at 0
        assert_eq!(v.reuse_direction(), !v.corner1() & DIRECTION_MASK_ALL);
        assert_ne!(v.reuse_direction(), 0);
      }
      assert!((1..=3).contains(&v.reuse_slot()));
    }
  }
}

#[test]
fn test_reuse_slot_matches_edge_axis() {
  let x_edge = RegularVertex(0x6201);
  assert_eq!((x_edge.corner0(), x_edge.corner1()), (0, 1));
  assert_eq!(x_edge.reuse_slot(), 2);
  assert_eq!(x_edge.reuse_direction(), 0b110);

  let y_edge = RegularVertex(0x5102);
  assert_eq!(y_edge.reuse_slot(), 1);
  assert_eq!(y_edge.reuse_direction(), 0b101);

  let z_edge = RegularVertex(0x3304);
  assert_eq!(z_edge.reuse_slot(), 3);
  assert_eq!(z_edge.reuse_direction(), 0b011);
}
