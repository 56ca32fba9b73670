//! Scalar fields and the sample lattice they are evaluated on.

use crate::constant;
use crate::error::{GeometryError, Result};
use crate::primitives::{Point3, Vec3};
use ndarray::Array3;
use num_traits::Float;

/// A scalar function over space whose sign marks inside (negative) and
/// outside (positive).
///
/// Any `Fn(Point3<F>) -> F` closure is a field:
///
/// ```
/// use tessera::isosurface::ScalarField;
/// use tessera::Point3;
///
/// let sphere = |p: Point3<f64>| 1.0 - (p.x * p.x + p.y * p.y + p.z * p.z);
/// assert!(sphere.value_at(Point3::origin()) > 0.0);
/// ```
pub trait ScalarField<F> {
    /// Evaluates the field at `p`.
    fn value_at(&self, p: Point3<F>) -> F;
}

impl<F, T> ScalarField<F> for T
where
    T: Fn(Point3<F>) -> F,
{
    #[inline]
    fn value_at(&self, p: Point3<F>) -> F {
        self(p)
    }
}

/// Positions of a regular grid of samples.
///
/// The last sample on each axis sits exactly on `last`, so a lattice built
/// from bounds never reaches past its upper corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Lattice<F> {
    origin: Point3<F>,
    cell: Vec3<F>,
    last: Point3<F>,
    samples: [usize; 3],
}

impl<F: Float> Lattice<F> {
    /// Lattice with `resolution` cells per axis spanning `[lower, upper]`.
    pub(crate) fn spanning(
        lower: Point3<F>,
        upper: Point3<F>,
        resolution: [usize; 3],
    ) -> Result<Self> {
        let [nx, ny, nz] = resolution;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GeometryError::InvalidResolution { nx, ny, nz });
        }
        if !lower.is_finite()
            || !upper.is_finite()
            || upper.x <= lower.x
            || upper.y <= lower.y
            || upper.z <= lower.z
        {
            return Err(GeometryError::InvalidBounds);
        }

        let extent = upper - lower;
        let cell = Vec3::new(
            extent.x / constant(nx as f64),
            extent.y / constant(ny as f64),
            extent.z / constant(nz as f64),
        );

        Ok(Self {
            origin: lower,
            cell,
            last: upper,
            samples: [nx + 1, ny + 1, nz + 1],
        })
    }

    /// Lattice matching a dense grid of `shape` samples.
    pub(crate) fn for_grid(
        shape: (usize, usize, usize),
        origin: Point3<F>,
        cell: Vec3<F>,
    ) -> Result<Self> {
        let (nx, ny, nz) = shape;
        if nx < 2 || ny < 2 || nz < 2 {
            return Err(GeometryError::GridTooSmall { nx, ny, nz });
        }
        if !origin.is_finite() {
            return Err(GeometryError::InvalidBounds);
        }
        if !cell.is_positive_finite() {
            return Err(GeometryError::InvalidCellSize);
        }

        let last = Point3::new(
            origin.x + cell.x * constant((nx - 1) as f64),
            origin.y + cell.y * constant((ny - 1) as f64),
            origin.z + cell.z * constant((nz - 1) as f64),
        );
        if !last.is_finite() {
            return Err(GeometryError::InvalidBounds);
        }

        Ok(Self {
            origin,
            cell,
            last,
            samples: [nx, ny, nz],
        })
    }

    /// Number of samples along each axis.
    #[inline]
    pub(crate) fn samples(&self) -> [usize; 3] {
        self.samples
    }

    /// Number of cells along each axis.
    #[inline]
    pub(crate) fn cells(&self) -> [usize; 3] {
        self.samples.map(|n| n - 1)
    }

    /// Position of sample `(i, j, k)`.
    #[inline]
    pub(crate) fn point(&self, i: usize, j: usize, k: usize) -> Point3<F> {
        Point3::new(
            axis(self.origin.x, self.cell.x, self.last.x, i, self.samples[0]),
            axis(self.origin.y, self.cell.y, self.last.y, j, self.samples[1]),
            axis(self.origin.z, self.cell.z, self.last.z, k, self.samples[2]),
        )
    }

    /// Evaluates `field` at every sample.
    pub(crate) fn sample<S>(&self, field: &S) -> Array3<F>
    where
        S: ScalarField<F> + ?Sized,
    {
        let [nx, ny, nz] = self.samples();
        Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| {
            field.value_at(self.point(i, j, k))
        })
    }

    /// Evaluates `field` at every sample, splitting the work across threads.
    #[cfg(feature = "parallel")]
    pub(crate) fn sample_par<S>(&self, field: &S) -> Array3<F>
    where
        F: Send + Sync,
        S: ScalarField<F> + Sync + ?Sized,
    {
        let [nx, ny, nz] = self.samples();
        let mut values = Array3::from_elem((nx, ny, nz), F::zero());
        ndarray::Zip::indexed(&mut values).par_for_each(|(i, j, k), v| {
            *v = field.value_at(self.point(i, j, k));
        });
        values
    }
}

#[inline]
fn axis<F: Float>(origin: F, cell: F, last: F, i: usize, samples: usize) -> F {
    if i + 1 == samples {
        last
    } else {
        origin + cell * constant(i as f64)
    }
}

/// Samples `field` on the lattice used by
/// [`extract_isosurface`](super::extract_isosurface).
///
/// The result has shape `(nx + 1, ny + 1, nz + 1)` and is indexed
/// `[ix, iy, iz]`. Passing it to
/// [`extract_isosurface_from_grid`](super::extract_isosurface_from_grid)
/// with `origin = lower` and `cell_size = (upper - lower) / resolution`
/// reproduces the functional extraction.
///
/// # Errors
///
/// - [`GeometryError::InvalidResolution`] if any resolution component is 0.
/// - [`GeometryError::InvalidBounds`] if a bound is not finite or
///   `upper <= lower` on some axis.
///
/// # Example
///
/// ```
/// use tessera::isosurface::sample_field;
/// use tessera::Point3;
///
/// let plane = |p: Point3<f64>| p.z - 0.5;
/// let upper = Point3::new(1.0, 1.0, 1.0);
/// let grid = sample_field(&plane, Point3::origin(), upper, [2, 2, 4]).unwrap();
///
/// assert_eq!(grid.dim(), (3, 3, 5));
/// assert_eq!(grid[[0, 0, 0]], -0.5);
/// assert_eq!(grid[[2, 2, 4]], 0.5);
/// ```
pub fn sample_field<F, S>(
    field: &S,
    lower: Point3<F>,
    upper: Point3<F>,
    resolution: [usize; 3],
) -> Result<Array3<F>>
where
    F: Float,
    S: ScalarField<F> + ?Sized,
{
    let lattice = Lattice::spanning(lower, upper, resolution)?;
    Ok(lattice.sample(field))
}
