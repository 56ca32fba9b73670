//! Marching cubes over a sampled lattice.
//!
//! Both entry points funnel into the same per-cell routine: the functional
//! mode samples its field onto a lattice first, so every corner is evaluated
//! exactly once and no corner ever falls outside the requested bounds.

use super::field::{Lattice, ScalarField};
use super::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};
use crate::error::Result;
use crate::primitives::{Point3, Triangle3, Vec3};
use ndarray::ArrayView3;
use num_traits::Float;
use tracing::debug;

/// Tunables for isosurface extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchingCubesConfig<F> {
    /// Level the surface is extracted at. A sample is inside when
    /// `value - iso_level < 0`.
    pub iso_level: F,
}

impl<F: Float> Default for MarchingCubesConfig<F> {
    fn default() -> Self {
        Self {
            iso_level: F::zero(),
        }
    }
}

impl<F: Float> MarchingCubesConfig<F> {
    /// Sets the iso level.
    pub fn with_iso_level(mut self, iso_level: F) -> Self {
        self.iso_level = iso_level;
        self
    }
}

/// Extracts the zero level set of `field` over the box `[lower, upper]`.
///
/// The box is divided into `resolution = [nx, ny, nz]` cells; the cell size
/// is `(upper - lower) / resolution` per axis. Returns an unindexed triangle
/// soup. Each triangle's normal `(b - a) × (c - a)` points toward the
/// negative side of the field.
///
/// # Errors
///
/// - [`GeometryError::InvalidResolution`](crate::GeometryError::InvalidResolution)
///   if any resolution component is 0.
/// - [`GeometryError::InvalidBounds`](crate::GeometryError::InvalidBounds) if a
///   bound is not finite or `upper <= lower` on some axis.
///
/// # Example
///
/// ```
/// use tessera::isosurface::extract_isosurface;
/// use tessera::Point3;
///
/// // Unit sphere: positive inside the ball
/// let sphere = |p: Point3<f64>| 1.0 - (p.x * p.x + p.y * p.y + p.z * p.z);
///
/// let soup = extract_isosurface(
///     &sphere,
///     Point3::new(-1.5, -1.5, -1.5),
///     Point3::new(1.5, 1.5, 1.5),
///     [12, 12, 12],
/// )
/// .unwrap();
///
/// assert!(!soup.is_empty());
/// for t in &soup {
///     for v in t.vertices() {
///         let r = (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
///         assert!((r - 1.0).abs() < 0.5);
///     }
/// }
/// ```
pub fn extract_isosurface<F, S>(
    field: &S,
    lower: Point3<F>,
    upper: Point3<F>,
    resolution: [usize; 3],
) -> Result<Vec<Triangle3<F>>>
where
    F: Float,
    S: ScalarField<F> + ?Sized,
{
    extract_isosurface_with_config(field, lower, upper, resolution, &MarchingCubesConfig::default())
}

/// Like [`extract_isosurface`], extracting at `config.iso_level`.
pub fn extract_isosurface_with_config<F, S>(
    field: &S,
    lower: Point3<F>,
    upper: Point3<F>,
    resolution: [usize; 3],
    config: &MarchingCubesConfig<F>,
) -> Result<Vec<Triangle3<F>>>
where
    F: Float,
    S: ScalarField<F> + ?Sized,
{
    let lattice = Lattice::spanning(lower, upper, resolution)?;
    let values = lattice.sample(field);
    Ok(march(values.view(), &lattice, config.iso_level))
}

/// Extracts the zero level set of a pre-sampled dense grid.
///
/// `grid` is indexed `[ix, iy, iz]`; sample `(i, j, k)` sits at
/// `origin + (i * cell_size.x, j * cell_size.y, k * cell_size.z)`. Every
/// cell whose eight corners are samples is visited, so a grid of shape
/// `(nx, ny, nz)` has `(nx - 1) * (ny - 1) * (nz - 1)` cells.
///
/// Uses the same inside test as [`extract_isosurface`].
///
/// # Errors
///
/// - [`GeometryError::GridTooSmall`](crate::GeometryError::GridTooSmall) if an
///   axis has fewer than 2 samples.
/// - [`GeometryError::InvalidCellSize`](crate::GeometryError::InvalidCellSize)
///   if a cell size component is not finite or not positive.
/// - [`GeometryError::InvalidBounds`](crate::GeometryError::InvalidBounds) if the
///   origin is not finite.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use tessera::isosurface::extract_isosurface_from_grid;
/// use tessera::{Point3, Vec3};
///
/// // A plane at z = 1.5 through a 4x4x4 block of samples
/// let grid = Array3::from_shape_fn((4, 4, 4), |(_, _, k)| k as f64 - 1.5);
/// let soup =
///     extract_isosurface_from_grid(grid.view(), Point3::origin(), Vec3::splat(1.0)).unwrap();
///
/// // Two triangles per crossed cell
/// assert_eq!(soup.len(), 2 * 3 * 3);
/// assert!(soup.iter().all(|t| t.vertices().iter().all(|v| v.z == 1.5)));
/// ```
pub fn extract_isosurface_from_grid<F: Float>(
    grid: ArrayView3<'_, F>,
    origin: Point3<F>,
    cell_size: Vec3<F>,
) -> Result<Vec<Triangle3<F>>> {
    extract_isosurface_from_grid_with_config(
        grid,
        origin,
        cell_size,
        &MarchingCubesConfig::default(),
    )
}

/// Like [`extract_isosurface_from_grid`], extracting at `config.iso_level`.
pub fn extract_isosurface_from_grid_with_config<F: Float>(
    grid: ArrayView3<'_, F>,
    origin: Point3<F>,
    cell_size: Vec3<F>,
    config: &MarchingCubesConfig<F>,
) -> Result<Vec<Triangle3<F>>> {
    let lattice = Lattice::for_grid(grid.dim(), origin, cell_size)?;
    Ok(march(grid, &lattice, config.iso_level))
}

/// Parallel [`extract_isosurface_with_config`].
///
/// Sampling and polygonization are split across the rayon thread pool. The
/// output is identical to the sequential call, triangle order included.
#[cfg(feature = "parallel")]
pub fn extract_isosurface_par<F, S>(
    field: &S,
    lower: Point3<F>,
    upper: Point3<F>,
    resolution: [usize; 3],
    config: &MarchingCubesConfig<F>,
) -> Result<Vec<Triangle3<F>>>
where
    F: Float + Send + Sync,
    S: ScalarField<F> + Sync + ?Sized,
{
    let lattice = Lattice::spanning(lower, upper, resolution)?;
    let values = lattice.sample_par(field);
    Ok(march_par(values.view(), &lattice, config.iso_level))
}

/// Parallel [`extract_isosurface_from_grid_with_config`].
///
/// The grid is processed one z-slab of cells per task and the slabs are
/// concatenated in order, so the output matches the sequential call.
#[cfg(feature = "parallel")]
pub fn extract_isosurface_from_grid_par<F>(
    grid: ArrayView3<'_, F>,
    origin: Point3<F>,
    cell_size: Vec3<F>,
    config: &MarchingCubesConfig<F>,
) -> Result<Vec<Triangle3<F>>>
where
    F: Float + Send + Sync,
{
    let lattice = Lattice::for_grid(grid.dim(), origin, cell_size)?;
    Ok(march_par(grid, &lattice, config.iso_level))
}

fn march<F: Float>(values: ArrayView3<'_, F>, lattice: &Lattice<F>, iso: F) -> Vec<Triangle3<F>> {
    let [_, _, cz] = lattice.cells();
    let mut triangles = Vec::new();
    for iz in 0..cz {
        march_slab(values, lattice, iso, iz, &mut triangles);
    }

    log_extraction(lattice, triangles.len());
    triangles
}

#[cfg(feature = "parallel")]
fn march_par<F>(values: ArrayView3<'_, F>, lattice: &Lattice<F>, iso: F) -> Vec<Triangle3<F>>
where
    F: Float + Send + Sync,
{
    use rayon::prelude::*;

    let [_, _, cz] = lattice.cells();
    let slabs: Vec<Vec<Triangle3<F>>> = (0..cz)
        .into_par_iter()
        .map(|iz| {
            let mut local = Vec::new();
            march_slab(values, lattice, iso, iz, &mut local);
            local
        })
        .collect();

    let triangles = slabs.concat();
    log_extraction(lattice, triangles.len());
    triangles
}

fn log_extraction<F: Float>(lattice: &Lattice<F>, triangles: usize) {
    let [cx, cy, cz] = lattice.cells();
    debug!(cells = cx * cy * cz, triangles, "extracted isosurface");
}

/// Polygonizes every cell in the z-slab `iz`, appending to `out`.
fn march_slab<F: Float>(
    values: ArrayView3<'_, F>,
    lattice: &Lattice<F>,
    iso: F,
    iz: usize,
    out: &mut Vec<Triangle3<F>>,
) {
    let [cx, cy, _] = lattice.cells();
    for iy in 0..cy {
        for ix in 0..cx {
            polygonize_cell(values, lattice, iso, [ix, iy, iz], out);
        }
    }
}

fn polygonize_cell<F: Float>(
    values: ArrayView3<'_, F>,
    lattice: &Lattice<F>,
    iso: F,
    [ix, iy, iz]: [usize; 3],
    out: &mut Vec<Triangle3<F>>,
) {
    let mut corner_values = [F::zero(); 8];
    let mut cube_index = 0usize;
    for (j, &[dx, dy, dz]) in CORNER_OFFSETS.iter().enumerate() {
        let v = values[[ix + dx, iy + dy, iz + dz]] - iso;
        corner_values[j] = v;
        if v < F::zero() {
            cube_index |= 1 << j;
        }
    }

    let crossed = EDGE_TABLE[cube_index];
    if crossed == 0 {
        return;
    }

    let corner = |j: usize| {
        let [dx, dy, dz] = CORNER_OFFSETS[j];
        lattice.point(ix + dx, iy + dy, iz + dz)
    };

    let mut crossings = [Point3::origin(); 12];
    for (e, &[a, b]) in EDGE_CORNERS.iter().enumerate() {
        if crossed & (1 << e) != 0 {
            crossings[e] = interpolate(corner(a), corner(b), corner_values[a], corner_values[b]);
        }
    }

    for tri in TRI_TABLE[cube_index]
        .chunks_exact(3)
        .take_while(|tri| tri[0] >= 0)
    {
        out.push(Triangle3::new(
            crossings[tri[0] as usize],
            crossings[tri[1] as usize],
            crossings[tri[2] as usize],
        ));
    }
}

/// Zero crossing of the linear interpolant between `(p0, v0)` and `(p1, v1)`.
///
/// Equal endpoint values place the crossing at `p0`.
#[inline]
fn interpolate<F: Float>(p0: Point3<F>, p1: Point3<F>, v0: F, v1: F) -> Point3<F> {
    let denom = v1 - v0;
    if denom == F::zero() {
        return p0;
    }
    let t = (-v0 / denom).max(F::zero()).min(F::one());
    p0.lerp(p1, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryError;
    use approx::assert_relative_eq;
    use ndarray::Array3;

    fn sphere(r: f64) -> impl Fn(Point3<f64>) -> f64 {
        move |p: Point3<f64>| r * r - (p.x * p.x + p.y * p.y + p.z * p.z)
    }

    #[test]
    fn test_interpolate_midpoint_and_guard() {
        let p0 = Point3::new(0.0_f64, 0.0, 0.0);
        let p1 = Point3::new(2.0, 0.0, 0.0);

        assert_relative_eq!(interpolate(p0, p1, -1.0, 1.0).x, 1.0);
        assert_relative_eq!(interpolate(p0, p1, -1.0, 3.0).x, 0.5);
        assert_eq!(interpolate(p0, p1, 0.0, 0.0), p0);
        assert_eq!(interpolate(p0, p1, 2.0, 2.0), p0);
    }

    #[test]
    fn test_single_corner_cell() {
        // Only corner 0 inside: one triangle cutting the corner
        let mut grid = Array3::from_elem((2, 2, 2), 1.0_f64);
        grid[[0, 0, 0]] = -1.0;

        let soup =
            extract_isosurface_from_grid(grid.view(), Point3::origin(), Vec3::splat(1.0)).unwrap();
        assert_eq!(soup.len(), 1);

        let t = soup[0];
        for v in t.vertices() {
            assert_relative_eq!(v.x + v.y + v.z, 0.5);
        }
        // Normal points toward the inside corner
        let n = t.normal();
        assert!(n.x < 0.0 && n.y < 0.0 && n.z < 0.0);
    }

    #[test]
    fn test_uniform_grid_is_empty() {
        let inside = Array3::from_elem((3, 3, 3), -1.0_f64);
        let outside = Array3::from_elem((3, 3, 3), 1.0_f64);
        let origin = Point3::origin();
        let cell = Vec3::splat(1.0);

        assert!(extract_isosurface_from_grid(inside.view(), origin, cell).unwrap().is_empty());
        assert!(extract_isosurface_from_grid(outside.view(), origin, cell).unwrap().is_empty());
    }

    #[test]
    fn test_zero_sample_counts_as_outside() {
        // Exactly zero is not inside, so a grid of zeros yields nothing
        let zeros = Array3::from_elem((2, 2, 2), 0.0_f64);
        let soup =
            extract_isosurface_from_grid(zeros.view(), Point3::origin(), Vec3::splat(1.0)).unwrap();
        assert!(soup.is_empty());
    }

    #[test]
    fn test_grid_respects_origin_and_cell_size() {
        let grid = Array3::from_shape_fn((2, 2, 2), |(i, _, _)| i as f64 - 0.25);
        let origin = Point3::new(10.0, 20.0, 30.0);
        let soup =
            extract_isosurface_from_grid(grid.view(), origin, Vec3::new(4.0, 1.0, 2.0)).unwrap();

        assert_eq!(soup.len(), 2);
        for t in &soup {
            for v in t.vertices() {
                assert_relative_eq!(v.x, 11.0);
                assert!(v.y >= 20.0 && v.y <= 21.0);
                assert!(v.z >= 30.0 && v.z <= 32.0);
            }
        }
    }

    #[test]
    fn test_iso_level_shifts_surface() {
        let grid = Array3::from_shape_fn((2, 2, 4), |(_, _, k)| k as f64);
        let config = MarchingCubesConfig::default().with_iso_level(1.5);
        let soup = extract_isosurface_from_grid_with_config(
            grid.view(),
            Point3::origin(),
            Vec3::splat(1.0),
            &config,
        )
        .unwrap();

        assert_eq!(soup.len(), 2);
        assert!(soup.iter().all(|t| t.vertices().iter().all(|v| v.z == 1.5)));
    }

    #[test]
    fn test_sphere_vertices_near_radius() {
        let r = 1.0;
        let soup = extract_isosurface(
            &sphere(r),
            Point3::new(-1.2, -1.2, -1.2),
            Point3::new(1.2, 1.2, 1.2),
            [16, 16, 16],
        )
        .unwrap();

        let diagonal = (3.0_f64).sqrt() * 2.4 / 16.0;
        assert!(!soup.is_empty());
        for t in &soup {
            for v in t.vertices() {
                let d = v.to_vec().magnitude();
                assert!((d - r).abs() <= diagonal);
            }
        }
    }

    #[test]
    fn test_functional_matches_grid() {
        let field = sphere(0.8);
        let lower = Point3::new(-1.0, -1.0, -1.0);
        let upper = Point3::new(1.0, 1.0, 1.0);
        let resolution = [10, 10, 10];

        let functional = extract_isosurface(&field, lower, upper, resolution).unwrap();
        let grid = crate::isosurface::sample_field(&field, lower, upper, resolution).unwrap();
        let gridded = extract_isosurface_from_grid(grid.view(), lower, Vec3::splat(0.2)).unwrap();

        assert_eq!(functional.len(), gridded.len());
        for (a, b) in functional.iter().zip(&gridded) {
            for (p, q) in a.vertices().iter().zip(b.vertices()) {
                assert_relative_eq!(p.x, q.x, epsilon = 1e-12);
                assert_relative_eq!(p.y, q.y, epsilon = 1e-12);
                assert_relative_eq!(p.z, q.z, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_extract_validates_input() {
        let field = sphere(1.0);
        let lower = Point3::new(-1.0, -1.0, -1.0);
        let upper = Point3::new(1.0, 1.0, 1.0);

        assert_eq!(
            extract_isosurface(&field, lower, upper, [0, 4, 4]),
            Err(GeometryError::InvalidResolution {
                nx: 0,
                ny: 4,
                nz: 4
            })
        );
        assert_eq!(
            extract_isosurface(&field, upper, lower, [4, 4, 4]),
            Err(GeometryError::InvalidBounds)
        );

        let flat = Array3::from_elem((4, 1, 4), 1.0_f64);
        assert_eq!(
            extract_isosurface_from_grid(flat.view(), lower, Vec3::splat(1.0)),
            Err(GeometryError::GridTooSmall {
                nx: 4,
                ny: 1,
                nz: 4
            })
        );
        let cube = Array3::from_elem((4, 4, 4), 1.0_f64);
        assert_eq!(
            extract_isosurface_from_grid(cube.view(), lower, Vec3::new(1.0, -1.0, 1.0)),
            Err(GeometryError::InvalidCellSize)
        );
    }

    #[test]
    fn test_field_never_sampled_outside_bounds() {
        use std::cell::Cell;

        let lower = Point3::new(-1.0_f64, -2.0, -3.0);
        let upper = Point3::new(1.0, 0.5, 0.1);
        let escaped = Cell::new(false);
        let field = |p: Point3<f64>| {
            let inside_x = p.x >= lower.x && p.x <= upper.x;
            let inside_y = p.y >= lower.y && p.y <= upper.y;
            let inside_z = p.z >= lower.z && p.z <= upper.z;
            if !(inside_x && inside_y && inside_z) {
                escaped.set(true);
            }
            p.x - 0.1
        };

        let soup = extract_isosurface(&field, lower, upper, [7, 9, 11]).unwrap();
        assert!(!soup.is_empty());
        assert!(!escaped.get());
    }

    #[test]
    fn test_f32_extraction() {
        let field = |p: Point3<f32>| 0.5 - (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
        let soup = extract_isosurface(
            &field,
            Point3::new(-1.0_f32, -1.0, -1.0),
            Point3::new(1.0_f32, 1.0, 1.0),
            [8, 8, 8],
        )
        .unwrap();
        assert!(!soup.is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let field = sphere(0.9);
        let lower = Point3::new(-1.0, -1.0, -1.0);
        let upper = Point3::new(1.0, 1.0, 1.0);
        let config = MarchingCubesConfig::default();

        let sequential = extract_isosurface(&field, lower, upper, [12, 10, 14]).unwrap();
        let parallel = extract_isosurface_par(&field, lower, upper, [12, 10, 14], &config).unwrap();
        assert_eq!(sequential, parallel);

        let grid = crate::isosurface::sample_field(&field, lower, upper, [12, 10, 14]).unwrap();
        let cell = Vec3::new(2.0 / 12.0, 0.2, 2.0 / 14.0);
        assert_eq!(
            extract_isosurface_from_grid_with_config(grid.view(), lower, cell, &config).unwrap(),
            extract_isosurface_from_grid_par(grid.view(), lower, cell, &config).unwrap()
        );
    }
}
