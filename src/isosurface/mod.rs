//! Isosurface extraction with marching cubes.
//!
//! A scalar field is either a closure evaluated on a regular lattice inside a
//! bounding box, or a dense [`ndarray`] grid of samples with a known origin
//! and cell size. Both produce an unindexed triangle soup.
//!
//! Corner values are compared against the configured iso level with a single
//! convention in both modes: a sample is inside when `value - iso_level < 0`,
//! so a sample exactly on the level counts as outside.
//!
//! # Example
//!
//! ```
//! use tessera::isosurface::{extract_isosurface, extract_isosurface_from_grid, sample_field};
//! use tessera::soup::signed_volume;
//! use tessera::{Point3, Vec3};
//!
//! let ball = |p: Point3<f64>| 0.75 - (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
//! let lower = Point3::new(-1.0, -1.0, -1.0);
//! let upper = Point3::new(1.0, 1.0, 1.0);
//!
//! let direct = extract_isosurface(&ball, lower, upper, [16, 16, 16]).unwrap();
//!
//! let grid = sample_field(&ball, lower, upper, [16, 16, 16]).unwrap();
//! let sampled = extract_isosurface_from_grid(grid.view(), lower, Vec3::splat(0.125)).unwrap();
//!
//! let v1 = signed_volume(&direct).abs();
//! let v2 = signed_volume(&sampled).abs();
//! assert!((v1 - v2).abs() < 1e-9);
//! ```

mod field;
mod marching_cubes;
pub mod tables;

pub use field::{sample_field, ScalarField};
pub use marching_cubes::{
    extract_isosurface, extract_isosurface_from_grid, extract_isosurface_from_grid_with_config,
    extract_isosurface_with_config, MarchingCubesConfig,
};

#[cfg(feature = "parallel")]
pub use marching_cubes::{extract_isosurface_from_grid_par, extract_isosurface_par};
