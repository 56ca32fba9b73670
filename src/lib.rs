//! tessera - Hulls, triangulations and isosurfaces
//!
//! Pure functions from geometric input to geometric output:
//!
//! - [`hull`]: convex hull of a 2D point set by Graham scan
//! - [`triangulation`]: Delaunay triangulation by sweep Bowyer-Watson
//! - [`polygon`]: ear clipping triangulation of simple polygons
//! - [`isosurface`]: marching cubes over a scalar function or a dense grid
//!
//! [`curves`] and [`sampling`] build inputs: Bézier polylines and regular
//! point sets.
//!
//! Triangulating algorithms return an unindexed triangle soup (see [`soup`]).
//! Everything is generic over `f32` and `f64` through [`num_traits::Float`].
//!
//! # Example
//!
//! ```
//! use tessera::{convex_hull, delaunay_triangulation, Point2};
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(0.5, 0.5),
//! ];
//!
//! assert_eq!(convex_hull(&points).len(), 4);
//! assert_eq!(delaunay_triangulation(&points).len(), 4);
//! ```

use num_traits::Float;

pub mod curves;
pub mod error;
pub mod hull;
pub mod isosurface;
pub mod polygon;
pub mod predicates;
pub mod primitives;
pub mod sampling;
pub mod soup;
pub mod triangulation;

pub use error::{GeometryError, Result};
pub use hull::{convex_hull, try_convex_hull};
pub use isosurface::{extract_isosurface, extract_isosurface_from_grid, MarchingCubesConfig};
pub use polygon::{triangulate_polygon, Polygon};
pub use predicates::{orient2d, Orientation};
pub use primitives::{Edge, Point2, Point3, Triangle2, Triangle3, Vec2, Vec3};
pub use soup::TriangleSoup;
pub use triangulation::{delaunay_triangulation, try_delaunay_triangulation};

/// Converts an `f64` constant into `F`.
#[inline]
pub(crate) fn constant<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}
