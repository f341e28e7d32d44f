//! terrain_mesher - Regular cell isosurface extraction for voxel terrain
//!
//! This crate turns a signed distance field sampled on a cubic voxel grid into
//! an indexed triangle mesh, using the regular cell part of Eric Lengyel's
//! Transvoxel algorithm: 256 corner-sign cases collapsed into 16 equivalence
//! classes, with vertices shared between neighboring cells through a sliding
//! reuse cache.
//!
//! # Features
//!
//! - **Compile-time case tables**: class, triangulation and vertex/reuse
//!   encodings generated by `const fn`
//! - **Vertex reuse**: each lattice edge produces one vertex inside a chunk
//! - **Fixed-point interpolation**: 8 fractional bits, bit-reproducible
//! - **Normals**: SDF gradient or angle-weighted geometry normals
//! - **Batch meshing**: independent chunks in parallel via rayon
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use terrain_mesher::{sdf_samplers::SphereSampler, MesherConfig, TerrainMesher};
//!
//! let config = MesherConfig::new().with_grid_size(16);
//! let mesher = TerrainMesher::new(config).unwrap();
//!
//! let sphere = SphereSampler::new(5.0).with_center(Vec3::splat(7.5));
//! let output = mesher.mesh_field(&sphere).unwrap();
//!
//! println!(
//!   "Generated {} vertices, {} triangles",
//!   output.vertices.len(),
//!   output.triangle_count()
//! );
//! assert!(!output.is_empty());
//! ```

pub mod case_tables;
pub mod constants;
pub mod error;
pub mod field;
pub mod grid;
pub mod metrics;
pub mod sdf_samplers;
pub mod types;

// Re-export commonly used items
pub use case_tables::{CaseTables, REGULAR_CELL_CLASS, REGULAR_CELL_DATA, REGULAR_VERTEX_DATA};
pub use constants::{CORNER_OFFSETS, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use error::MeshError;
pub use field::ScalarField;
pub use grid::VoxelGrid;
pub use metrics::MeshStats;
pub use types::{
  sdf_conversion, BoundaryPolicy, CaseCode, DirectionMask, MeshOutput, MesherConfig, MinMaxAABB,
  NormalMode, SdfSample, Vertex,
};

// Regular cell meshing kernel
pub mod mesher;
pub use mesher::{generate, DebugSink, TerrainMesher};

// Parallel batch meshing of independent chunks
pub mod pipeline;
pub use pipeline::{mesh_batch, mesh_chunk, ChunkResult};
