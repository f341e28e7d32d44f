//! Benchmarks for regular cell meshing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use terrain_mesher::sdf_samplers::{SphereSampler, TiltedPlaneSampler};
use terrain_mesher::{generate, mesh_batch, MesherConfig, NormalMode, VoxelGrid};

fn sphere_grid(size: usize) -> (VoxelGrid, MesherConfig) {
  let config = MesherConfig::new().with_grid_size(size);
  let center = Vec3::splat(size as f32 * 0.5);
  let sphere = SphereSampler::new(size as f32 * 0.375).with_center(center);
  let grid = VoxelGrid::sample(&sphere, &config).expect("valid sphere grid");
  (grid, config)
}

/// Mesh a presampled sphere at several grid sizes.
fn bench_sphere_sizes(c: &mut Criterion) {
  let mut group = c.benchmark_group("mesher::generate sphere");

  for size in [16, 32, 64] {
    let (grid, config) = sphere_grid(size);
    group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
      b.iter(|| {
        let output = generate(black_box(grid), &config).expect("mesh");
        black_box(output)
      });
    });
  }

  group.finish();
}

/// Gradient vs geometry normal pass on the same grid.
fn bench_normal_modes(c: &mut Criterion) {
  let (grid, config) = sphere_grid(32);
  let mut group = c.benchmark_group("mesher::normals");

  for mode in [NormalMode::Gradient, NormalMode::Geometry] {
    let config = config.clone().with_normal_mode(mode);
    group.bench_function(format!("{mode:?}"), |b| {
      b.iter(|| black_box(generate(black_box(&grid), &config).expect("mesh")));
    });
  }

  group.finish();
}

/// Cost of losing vertex reuse.
fn bench_cache_window(c: &mut Criterion) {
  let (grid, config) = sphere_grid(32);
  let mut group = c.benchmark_group("mesher::cache_window");

  for window in [None, Some(31), Some(0)] {
    let config = match window {
      Some(window) => config.clone().with_cache_window(window),
      None => config.clone(),
    };
    let label = window.map_or_else(|| "default".to_string(), |w| w.to_string());
    group.bench_function(label, |b| {
      b.iter(|| black_box(generate(black_box(&grid), &config).expect("mesh")));
    });
  }

  group.finish();
}

/// Sample and mesh a 4x4 patch of chunks in parallel.
fn bench_batch(c: &mut Criterion) {
  let field = TiltedPlaneSampler::new().with_angle_degrees(30.0).with_height(16.0);
  let config = MesherConfig::new().with_grid_size(33);
  let origins: Vec<[f32; 3]> = (0..4)
    .flat_map(|x| (0..4).map(move |z| [x as f32 * 32.0, 0.0, z as f32 * 32.0]))
    .collect();

  c.bench_function("pipeline::mesh_batch (16 chunks, 32³ cells)", |b| {
    b.iter(|| black_box(mesh_batch(&field, &config, black_box(&origins))));
  });
}

criterion_group!(
  benches,
  bench_sphere_sizes,
  bench_normal_modes,
  bench_cache_window,
  bench_batch
);
criterion_main!(benches);
